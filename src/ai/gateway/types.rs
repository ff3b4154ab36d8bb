//! Chat-completion request/response payloads for the generation gateway.

use serde::{Deserialize, Serialize};

/// Request body for chat completions.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Chat message object.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.to_string()),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.to_string()),
        }
    }
}

/// Top-level chat completion response.
///
/// Kept as raw JSON: a reply of any shape is accepted and the completion text
/// is looked up by path, so odd shapes surface as "no content".
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct ChatCompletionResponse(pub serde_json::Value);

impl ChatCompletionResponse {
    /// Text of the first choice, if the gateway produced any.
    pub fn first_content(&self) -> Option<&str> {
        self.0
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_two_messages_and_temperature() {
        let request = ChatCompletionRequest {
            model: "m".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            temperature: 0.9,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert!((value["temperature"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_first_content_handles_missing_pieces() {
        let empty: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.first_content(), None);

        let no_content: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert_eq!(no_content.first_content(), None);

        let no_message: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"finish_reason":"length"}]}"#).unwrap();
        assert_eq!(no_message.first_content(), None);

        for odd in [
            r#"{"choices":null}"#,
            r#"{"choices":[{"message":null}]}"#,
            r#"{"choices":[{"message":{"content":123}}]}"#,
            r#"{"choices":{"0":{}}}"#,
            r#"[]"#,
        ] {
            let response: ChatCompletionResponse = serde_json::from_str(odd).unwrap();
            assert_eq!(response.first_content(), None, "for {}", odd);
        }

        let full: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"[\"a\"]"},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert_eq!(full.first_content(), Some(r#"["a"]"#));
    }
}
