//! Caption proxy
//!
//! Validates an incoming caption request, forwards the description to the
//! generation gateway and shapes every outcome into a JSON reply with a status.

pub mod server;

pub use server::{router, serve};

use crate::ai::{ChatService, GatewayChatClient};
use crate::models::{CaptionResponse, Config, ErrorResponse, DEFAULT_GATEWAY_URL, DEFAULT_MODEL};
use crate::normalize::normalize;
use crate::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

pub const MSG_DESCRIPTION_REQUIRED: &str = "Description is required";
pub const MSG_API_KEY_MISSING: &str = "API key not configured";
pub const MSG_RATE_LIMITED: &str = "Rate limit exceeded. Please try again later.";
pub const MSG_NO_CREDITS: &str = "Please add credits to your Lovable AI workspace.";
pub const MSG_GENERATION_FAILED: &str = "Failed to generate captions";
pub const MSG_UNKNOWN: &str = "Unknown error occurred";

/// Settings the proxy needs, injected at construction.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub gateway_url: String,
}

impl ProxyConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
        }
    }
}

impl From<Config> for ProxyConfig {
    fn from(config: Config) -> Self {
        Self {
            api_key: config.api_key,
            model: config.model,
            gateway_url: config.gateway_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ReplyBody {
    Captions(CaptionResponse),
    Error(ErrorResponse),
}

/// Status and JSON body produced for one proxy call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyReply {
    pub status: StatusCode,
    pub body: ReplyBody,
}

impl ProxyReply {
    fn captions(captions: Vec<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: ReplyBody::Captions(CaptionResponse { captions }),
        }
    }

    fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ReplyBody::Error(ErrorResponse::new(message)),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            ReplyBody::Error(e) => Some(&e.error),
            ReplyBody::Captions(_) => None,
        }
    }

    pub fn captions_list(&self) -> Option<&[String]> {
        match &self.body {
            ReplyBody::Captions(c) => Some(&c.captions),
            ReplyBody::Error(_) => None,
        }
    }
}

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Stateless request handler; each call is independent of every other.
pub struct CaptionProxy {
    config: ProxyConfig,
    chat: Option<Arc<dyn ChatService>>,
}

impl CaptionProxy {
    /// Build a proxy talking to the configured gateway.
    ///
    /// Without a credential no gateway client is created and every call fails
    /// with a configuration error.
    pub fn new(config: ProxyConfig) -> Self {
        let chat = config.api_key.clone().map(|api_key| {
            Arc::new(GatewayChatClient::new(
                api_key,
                config.model.clone(),
                config.gateway_url.clone(),
            )) as Arc<dyn ChatService>
        });
        Self { config, chat }
    }

    /// Build a proxy around an already constructed chat service.
    pub fn with_service(config: ProxyConfig, chat: Arc<dyn ChatService>) -> Self {
        Self {
            config,
            chat: Some(chat),
        }
    }

    /// Handle one raw JSON request body.
    pub async fn handle(&self, body: &[u8]) -> ProxyReply {
        match self.generate(body).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Error in generate-captions handler: {}", e);
                let message = e.to_string();
                if message.is_empty() {
                    ProxyReply::error(StatusCode::INTERNAL_SERVER_ERROR, MSG_UNKNOWN)
                } else {
                    ProxyReply::error(StatusCode::INTERNAL_SERVER_ERROR, message)
                }
            }
        }
    }

    async fn generate(&self, body: &[u8]) -> crate::Result<ProxyReply> {
        let payload: serde_json::Value = serde_json::from_slice(body)?;

        let description = match payload.get("description").and_then(|d| d.as_str()) {
            Some(d) if !d.trim().is_empty() => d,
            _ => {
                return Ok(ProxyReply::error(
                    StatusCode::BAD_REQUEST,
                    MSG_DESCRIPTION_REQUIRED,
                ))
            }
        };

        let chat = match (&self.config.api_key, &self.chat) {
            (Some(_), Some(chat)) => chat,
            _ => {
                tracing::error!("LOVABLE_API_KEY is not set");
                return Ok(ProxyReply::error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    MSG_API_KEY_MISSING,
                ));
            }
        };

        tracing::info!("Generating captions for: {}", description);

        let content = match chat.complete_captions(description).await {
            Ok(content) => content,
            Err(Error::Upstream { status, body }) => {
                tracing::error!("AI API error: {} {}", status, body);
                return Ok(upstream_failure(status));
            }
            Err(e) => return Err(e),
        };

        let normalized = normalize(content.as_deref());
        tracing::info!(
            "Generated captions ({:?}): {:?}",
            normalized.source,
            normalized.captions
        );

        Ok(ProxyReply::captions(normalized.captions))
    }
}

fn upstream_failure(status: u16) -> ProxyReply {
    match status {
        429 => ProxyReply::error(StatusCode::TOO_MANY_REQUESTS, MSG_RATE_LIMITED),
        402 => ProxyReply::error(StatusCode::PAYMENT_REQUIRED, MSG_NO_CREDITS),
        _ => ProxyReply::error(StatusCode::INTERNAL_SERVER_ERROR, MSG_GENERATION_FAILED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockChatClient;
    use crate::normalize::fallback_captions;
    use pretty_assertions::assert_eq;

    fn proxy_with(mock: &MockChatClient) -> CaptionProxy {
        CaptionProxy::with_service(
            ProxyConfig::new(Some("test-key".to_string())),
            Arc::new(mock.clone()),
        )
    }

    #[tokio::test]
    async fn test_valid_description_returns_captions() {
        let mock = MockChatClient::new()
            .with_completion(r#"["A great day! 🌴","Second caption here"]"#.to_string());
        let reply = proxy_with(&mock)
            .handle(br#"{"description":"Beach day"}"#)
            .await;

        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            reply.captions_list().unwrap(),
            &["A great day! 🌴".to_string(), "Second caption here".to_string()]
        );
        assert_eq!(mock.get_descriptions(), vec!["Beach day"]);
    }

    #[tokio::test]
    async fn test_missing_or_blank_description_is_bad_request() {
        let mock = MockChatClient::new();
        let proxy = proxy_with(&mock);

        let bodies: [&[u8]; 6] = [
            br#"{}"#,
            br#"{"description":""}"#,
            br#"{"description":"   \n"}"#,
            br#"{"description":null}"#,
            br#"{"description":42}"#,
            br#"[]"#,
        ];
        for body in bodies {
            let reply = proxy.handle(body).await;
            assert_eq!(reply.status, StatusCode::BAD_REQUEST);
            assert_eq!(reply.error_message(), Some(MSG_DESCRIPTION_REQUIRED));
        }
        assert_eq!(mock.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_fast() {
        let mock = MockChatClient::new();
        let proxy = CaptionProxy::with_service(ProxyConfig::new(None), Arc::new(mock.clone()));

        let reply = proxy.handle(br#"{"description":"Alps"}"#).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(reply.error_message(), Some(MSG_API_KEY_MISSING));
        assert_eq!(mock.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_new_without_key_reports_missing_key() {
        let proxy = CaptionProxy::new(ProxyConfig::new(None));
        let reply = proxy.handle(br#"{"description":"Alps"}"#).await;
        assert_eq!(reply.error_message(), Some(MSG_API_KEY_MISSING));
    }

    #[tokio::test]
    async fn test_upstream_statuses_are_mapped() {
        let cases = [
            (429, StatusCode::TOO_MANY_REQUESTS, MSG_RATE_LIMITED),
            (402, StatusCode::PAYMENT_REQUIRED, MSG_NO_CREDITS),
            (500, StatusCode::INTERNAL_SERVER_ERROR, MSG_GENERATION_FAILED),
            (401, StatusCode::INTERNAL_SERVER_ERROR, MSG_GENERATION_FAILED),
        ];

        for (upstream, expected_status, expected_message) in cases {
            let mock = MockChatClient::new().with_upstream_error(upstream, "boom".to_string());
            let reply = proxy_with(&mock)
                .handle(br#"{"description":"Kyoto"}"#)
                .await;
            assert_eq!(reply.status, expected_status);
            assert_eq!(reply.error_message(), Some(expected_message));
            assert_eq!(mock.get_call_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_empty_completion_uses_fallback() {
        let mock = MockChatClient::new().with_empty_completion();
        let reply = proxy_with(&mock)
            .handle(br#"{"description":"Kyoto"}"#)
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.captions_list().unwrap(), fallback_captions().as_slice());
    }

    #[tokio::test]
    async fn test_odd_gateway_reply_shapes_use_fallback() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let shapes = [
            serde_json::json!({ "choices": null }),
            serde_json::json!({ "choices": [{ "message": null }] }),
            serde_json::json!({ "choices": [{ "message": { "content": 123 } }] }),
        ];

        for shape in shapes {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_json(shape.clone()))
                .expect(1)
                .mount(&server)
                .await;

            let proxy = CaptionProxy::new(ProxyConfig {
                api_key: Some("test-key".to_string()),
                model: DEFAULT_MODEL.to_string(),
                gateway_url: server.uri(),
            });
            let reply = proxy.handle(br#"{"description":"Kyoto"}"#).await;

            assert_eq!(reply.status, StatusCode::OK, "for {}", shape);
            assert_eq!(reply.captions_list().unwrap(), fallback_captions().as_slice());
        }
    }

    #[tokio::test]
    async fn test_non_json_gateway_body_is_unexpected_failure() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let proxy = CaptionProxy::new(ProxyConfig {
            api_key: Some("test-key".to_string()),
            model: DEFAULT_MODEL.to_string(),
            gateway_url: server.uri(),
        });
        let reply = proxy.handle(br#"{"description":"Kyoto"}"#).await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_message() {
        let mock = MockChatClient::new().with_transport_error("connection reset".to_string());
        let reply = proxy_with(&mock)
            .handle(br#"{"description":"Kyoto"}"#)
            .await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(reply.error_message().unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_unexpected_failure() {
        let mock = MockChatClient::new();
        let reply = proxy_with(&mock).handle(b"not json").await;
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(reply.error_message().is_some());
        assert_eq!(mock.get_call_count(), 0);
    }

    #[test]
    fn test_reply_body_shapes() {
        let ok = serde_json::to_string(&ReplyBody::Captions(CaptionResponse {
            captions: vec!["a".to_string()],
        }))
        .unwrap();
        assert_eq!(ok, r#"{"captions":["a"]}"#);

        let err = serde_json::to_string(&ReplyBody::Error(ErrorResponse::new("x"))).unwrap();
        assert_eq!(err, r#"{"error":"x"}"#);
    }
}
