use super::client::GatewayHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage};
use crate::ai::ChatService;
use crate::{prompts, Result};
use async_trait::async_trait;

pub struct GatewayChatClient {
    http: GatewayHttpClient,
    model: String,
}

impl GatewayChatClient {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: GatewayHttpClient::new_with_client(api_key, base_url, reqwest::Client::new()),
            model,
        }
    }
}

#[async_trait]
impl ChatService for GatewayChatClient {
    async fn complete_captions(&self, description: &str) -> Result<Option<String>> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(prompts::CAPTION_SYSTEM),
                ChatMessage::user(description),
            ],
            temperature: prompts::CAPTION_TEMPERATURE,
        };

        let response = self.http.chat_completion(request).await?;
        tracing::debug!("AI response: {:?}", response);

        Ok(response.first_content().map(str::to_string))
    }
}
