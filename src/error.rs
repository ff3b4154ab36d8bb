//! Error handling and custom error types
//!
//! Provides unified error handling across the proxy and the client using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The generation gateway answered with a non-success status.
    #[error("Upstream API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("AI provider error: {0}")]
    AiProvider(String),

    /// The caption proxy answered with an error envelope.
    #[error("Caption proxy error (status {status}): {message}")]
    Proxy { status: u16, message: String },

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

pub type Result<T> = std::result::Result<T, Error>;
