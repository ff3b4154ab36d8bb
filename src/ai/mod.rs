//! Upstream generation provider integration
//!
//! Sends a travel description to a chat-completion gateway and hands back the
//! raw completion text for normalization.

pub mod gateway;
pub mod mock;

pub use gateway::GatewayChatClient;
pub use mock::MockChatClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Ask the model for captions describing `description`.
    ///
    /// `Ok(None)` means the gateway answered successfully but without any
    /// completion text. A non-success status surfaces as [`crate::Error::Upstream`].
    async fn complete_captions(&self, description: &str) -> Result<Option<String>>;
}
