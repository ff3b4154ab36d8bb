use super::CaptionApi;
use crate::models::{CaptionRequest, CaptionResponse, ErrorResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/generate-captions";

/// Calls the caption proxy over HTTP.
pub struct HttpCaptionApi {
    client: Client,
    endpoint: String,
}

impl HttpCaptionApi {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl CaptionApi for HttpCaptionApi {
    async fn generate(&self, description: &str) -> Result<Vec<String>> {
        tracing::debug!("Requesting captions from {}", self.endpoint);

        let request = CaptionRequest {
            description: description.to_string(),
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(Error::Proxy {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CaptionResponse = serde_json::from_str(&body)?;
        Ok(parsed.captions)
    }
}
