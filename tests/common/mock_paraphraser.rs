//! Mock Paraphraser for Testing
//!
//! Records every request and answers with a canned reply.

use async_trait::async_trait;
use rephrase::error::{RephraseError, RephraseResult};
use rephrase::paraphrase::Paraphraser;
use std::sync::{Arc, Mutex};

/// Mock backend that records requested text
#[derive(Debug)]
pub struct MockParaphraser {
    /// All text sent for paraphrasing
    pub requests: Arc<Mutex<Vec<String>>>,
    /// Reply returned on success
    reply: String,
    /// Simulate a network failure
    pub should_fail: Arc<Mutex<bool>>,
}

impl MockParaphraser {
    pub fn replying(reply: &str) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            reply: reply.to_string(),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn failing() -> Self {
        let mock = Self::replying("");
        *mock.should_fail.lock().unwrap() = true;
        mock
    }

    /// Number of calls received
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Paraphraser for MockParaphraser {
    async fn paraphrase(&self, text: &str) -> RephraseResult<String> {
        self.requests.lock().unwrap().push(text.to_string());
        if *self.should_fail.lock().unwrap() {
            return Err(RephraseError::Transport("connection refused".to_string()));
        }
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
