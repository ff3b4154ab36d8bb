use super::ChatService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Content(Option<String>),
    Upstream { status: u16, body: String },
    Transport(String),
}

#[derive(Clone)]
pub struct MockChatClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    descriptions: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            descriptions: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_completion(self, content: String) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Content(Some(content)));
        self
    }

    /// Successful gateway reply that carries no completion text.
    pub fn with_empty_completion(self) -> Self {
        self.replies.lock().unwrap().push(MockReply::Content(None));
        self
    }

    pub fn with_upstream_error(self, status: u16, body: String) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Upstream { status, body });
        self
    }

    pub fn with_transport_error(self, message: String) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Transport(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_descriptions(&self) -> Vec<String> {
        self.descriptions.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn complete_captions(&self, description: &str) -> Result<Option<String>> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.descriptions
            .lock()
            .unwrap()
            .push(description.to_string());

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Default mock response
            return Ok(Some(format!(
                "[\"A moment to remember: {}\", \"Wander often, wonder always\"]",
                description
            )));
        }

        let index = (*count - 1) % replies.len();
        match &replies[index] {
            MockReply::Content(content) => Ok(content.clone()),
            MockReply::Upstream { status, body } => Err(Error::Upstream {
                status: *status,
                body: body.clone(),
            }),
            MockReply::Transport(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_chat_client_default_completion() {
        let client = MockChatClient::new();
        let content = client.complete_captions("Lisbon trams").await.unwrap().unwrap();
        assert!(content.contains("Lisbon trams"));
    }

    #[tokio::test]
    async fn test_mock_chat_client_cycles_replies() {
        let client = MockChatClient::new()
            .with_completion("first".to_string())
            .with_upstream_error(402, "no credits".to_string());

        assert_eq!(
            client.complete_captions("a").await.unwrap().as_deref(),
            Some("first")
        );
        assert!(matches!(
            client.complete_captions("b").await.unwrap_err(),
            Error::Upstream { status: 402, .. }
        ));
        assert_eq!(
            client.complete_captions("c").await.unwrap().as_deref(),
            Some("first")
        );
        assert_eq!(client.get_call_count(), 3);
        assert_eq!(client.get_descriptions(), vec!["a", "b", "c"]);
    }
}
