//! Caption request initiator
//!
//! Holds the description being edited, the captions from the latest successful
//! generation and the notices raised along the way. Talks to the caption proxy
//! through [`CaptionApi`] and to the system clipboard through [`Clipboard`].

pub mod clipboard;
pub mod http;
pub mod mock;

pub use clipboard::SystemClipboard;
pub use http::HttpCaptionApi;
pub use mock::{MockCaptionApi, MockClipboard};

use crate::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[async_trait]
pub trait CaptionApi: Send + Sync {
    async fn generate(&self, description: &str) -> Result<Vec<String>>;
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Transient user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    fn new(title: &str, description: &str, variant: NoticeVariant) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant,
        }
    }

    pub fn description_required() -> Self {
        Self::new(
            "Description required",
            "Please describe your travel moment first!",
            NoticeVariant::Destructive,
        )
    }

    pub fn generated() -> Self {
        Self::new(
            "Captions generated!",
            "Your travel captions are ready.",
            NoticeVariant::Default,
        )
    }

    pub fn generation_failed() -> Self {
        Self::new(
            "Generation failed",
            "Failed to generate captions. Please try again.",
            NoticeVariant::Destructive,
        )
    }

    pub fn copied() -> Self {
        Self::new(
            "Copied!",
            "Caption copied to clipboard.",
            NoticeVariant::Default,
        )
    }

    pub fn copy_failed() -> Self {
        Self::new(
            "Copy failed",
            "Could not access the clipboard.",
            NoticeVariant::Destructive,
        )
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

/// Shared pending flag a renderer can poll while a request is in flight.
#[derive(Debug, Clone, Default)]
pub struct LoadingState(Arc<AtomicBool>);

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn begin(&self) -> PendingGuard<'_> {
        self.0.store(true, Ordering::SeqCst);
        PendingGuard(self.0.as_ref())
    }
}

/// Clears the pending flag when the request finishes or is dropped mid-flight.
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct CaptionGenerator {
    api: Box<dyn CaptionApi>,
    clipboard: Box<dyn Clipboard>,
    description: String,
    captions: Vec<String>,
    loading: LoadingState,
    notices: Vec<Notice>,
}

impl CaptionGenerator {
    pub fn new(api: Box<dyn CaptionApi>, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            api,
            clipboard,
            description: String::new(),
            captions: Vec::new(),
            loading: LoadingState::default(),
            notices: Vec::new(),
        }
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn captions(&self) -> &[String] {
        &self.captions
    }

    /// True while a generation request is in flight; submission is disabled then.
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Handle to the pending flag, readable while `submit_description` runs.
    pub fn loading_state(&self) -> LoadingState {
        self.loading.clone()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Submit the description currently held by the generator.
    pub async fn generate(&mut self) -> std::result::Result<&[String], Notice> {
        let text = self.description.clone();
        self.submit_description(&text).await
    }

    /// Request captions for `text`.
    ///
    /// Blank input is rejected locally. On success the caption list is replaced
    /// wholesale; on failure the previous captions are kept.
    pub async fn submit_description(
        &mut self,
        text: &str,
    ) -> std::result::Result<&[String], Notice> {
        if text.trim().is_empty() {
            return Err(self.notify(Notice::description_required()));
        }
        let outcome = {
            let _pending = self.loading.begin();
            self.api.generate(text).await
        };

        match outcome {
            Ok(captions) => {
                self.captions = captions;
                self.notify(Notice::generated());
                Ok(self.captions.as_slice())
            }
            Err(e) => {
                tracing::error!("Error generating captions: {}", e);
                Err(self.notify(Notice::generation_failed()))
            }
        }
    }

    pub fn copy_caption(&mut self, text: &str) {
        match self.clipboard.write_text(text) {
            Ok(()) => {
                self.notify(Notice::copied());
            }
            Err(e) => {
                tracing::warn!("Failed to copy caption: {}", e);
                self.notify(Notice::copy_failed());
            }
        }
    }

    /// Copy the caption at `index`; returns false when there is no such caption.
    pub fn copy_caption_at(&mut self, index: usize) -> bool {
        match self.captions.get(index).cloned() {
            Some(caption) => {
                self.copy_caption(&caption);
                true
            }
            None => false,
        }
    }

    fn notify(&mut self, notice: Notice) -> Notice {
        self.notices.push(notice.clone());
        notice
    }
}
