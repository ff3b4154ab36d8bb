//! Data models and structures
//!
//! Defines the request/response envelopes exchanged between the client and the
//! caption proxy, and the environment-derived configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionRequest {
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptionResponse {
    pub captions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the generation gateway. Absence is reported per request.
    pub api_key: Option<String>,
    pub model: String,
    pub gateway_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_key: std::env::var("LOVABLE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: std::env::var("CAPTION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            gateway_url: std::env::var("CAPTION_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
        }
    }
}
