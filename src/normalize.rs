//! Turns a free-form model completion into a clean caption list.
//!
//! Strategies run in a fixed order and each either yields captions or declines:
//! a bracketed JSON array anywhere in the text, then line-by-line recovery, then
//! the built-in fallback list, which always succeeds.

use crate::prompts::{FALLBACK_CAPTIONS, MAX_CAPTIONS};

/// Which strategy produced a caption list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionSource {
    JsonArray,
    Lines,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub captions: Vec<String>,
    pub source: CaptionSource,
}

type Strategy = fn(&str) -> Option<Vec<String>>;

const STRATEGIES: [(CaptionSource, Strategy); 2] = [
    (CaptionSource::JsonArray, parse_json_array),
    (CaptionSource::Lines, parse_lines),
];

/// Normalize the completion text; `None` means the reply carried no text at all.
pub fn normalize(content: Option<&str>) -> Normalized {
    if let Some(text) = content {
        for (source, strategy) in STRATEGIES {
            if let Some(captions) = strategy(text) {
                tracing::debug!("Captions recovered via {:?}", source);
                return Normalized { captions, source };
            }
        }
        tracing::warn!("Could not parse captions from model reply: {}", text);
    } else {
        tracing::warn!("Model reply contained no text content");
    }

    Normalized {
        captions: fallback_captions(),
        source: CaptionSource::Fallback,
    }
}

pub fn fallback_captions() -> Vec<String> {
    FALLBACK_CAPTIONS.iter().map(|c| c.to_string()).collect()
}

/// Parse the span from the first `[` to the last `]` as a JSON array.
///
/// Non-string and blank elements are dropped and the list is capped.
pub fn parse_json_array(text: &str) -> Option<Vec<String>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }

    let values: Vec<serde_json::Value> = match serde_json::from_str(&text[start..=end]) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!("Bracketed array in model reply is not valid JSON: {}", e);
            return None;
        }
    };

    let captions: Vec<String> = values
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::String(caption) if !caption.trim().is_empty() => Some(caption),
            _ => None,
        })
        .take(MAX_CAPTIONS)
        .collect();

    (!captions.is_empty()).then_some(captions)
}

/// Recover captions from a numbered or bulleted list, one caption per line.
pub fn parse_lines(text: &str) -> Option<Vec<String>> {
    let captions: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('[') && !line.starts_with(']'))
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .take(MAX_CAPTIONS)
        .collect();

    (!captions.is_empty()).then_some(captions)
}

fn clean_line(line: &str) -> String {
    let line = strip_list_marker(line).trim();
    let line = line.strip_suffix(',').unwrap_or(line);
    let line = strip_wrapping_quotes(line).trim();
    if line.chars().all(|c| c == '"' || c == '\'') {
        return String::new();
    }
    line.to_string()
}

/// Remove one matching pair of surrounding quotes, leaving inner quotes alone.
fn strip_wrapping_quotes(line: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = line
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    line
}

fn strip_list_marker(line: &str) -> &str {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix('.') {
            return rest;
        }
    }
    line.strip_prefix(['-', '*']).unwrap_or(line)
}
