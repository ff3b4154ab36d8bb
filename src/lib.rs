//! Travel caption generator
//!
//! A caption proxy that forwards a travel-moment description to a chat-completion
//! gateway and normalizes the reply into a short list of captions, plus the
//! client that submits descriptions and copies captions to the clipboard.

pub mod ai;
pub mod client;
pub mod error;
pub mod models;
pub mod normalize;
pub mod prompts;
pub mod proxy;

pub use error::{Error, Result};
