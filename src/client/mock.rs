use super::{CaptionApi, Clipboard};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockOutcome {
    Captions(Vec<String>),
    Failure { status: u16, message: String },
}

#[derive(Clone)]
pub struct MockCaptionApi {
    outcomes: Arc<Mutex<Vec<MockOutcome>>>,
    descriptions: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockCaptionApi {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            descriptions: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_captions(self, captions: Vec<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Captions(captions));
        self
    }

    pub fn with_failure(self, status: u16, message: String) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Failure { status, message });
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_descriptions(&self) -> Vec<String> {
        self.descriptions.lock().unwrap().clone()
    }
}

impl Default for MockCaptionApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionApi for MockCaptionApi {
    async fn generate(&self, description: &str) -> Result<Vec<String>> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.descriptions
            .lock()
            .unwrap()
            .push(description.to_string());

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            return Ok(vec![format!("Postcard from {}", description.trim())]);
        }

        let index = (*count - 1) % outcomes.len();
        match &outcomes[index] {
            MockOutcome::Captions(captions) => Ok(captions.clone()),
            MockOutcome::Failure { status, message } => Err(Error::Proxy {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

/// In-memory clipboard that records every write.
#[derive(Clone, Default)]
pub struct MockClipboard {
    contents: Arc<Mutex<Option<String>>>,
    write_count: Arc<Mutex<usize>>,
    fail: bool,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write fail, as when no clipboard is available.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn get_contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }

    pub fn get_write_count(&self) -> usize {
        *self.write_count.lock().unwrap()
    }
}

impl Clipboard for MockClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(Error::Clipboard("clipboard unavailable".to_string()));
        }
        *self.write_count.lock().unwrap() += 1;
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}
