//! Fake LLM provider for testing.
//!
//! This provider returns canned responses in order, allowing tests to run
//! without network access or API costs, and records every request it sees.

use super::{ChatRequest, ChatResponse, LlmError, LlmProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A fake LLM provider for testing.
///
/// Each call pops the next queued outcome. When the queue is empty the
/// default response is returned, or an error if there is none.
#[derive(Debug, Default)]
pub struct FakeProvider {
    outcomes: Mutex<VecDeque<Result<String, LlmError>>>,
    default_response: Option<String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeProvider {
    /// Create a new FakeProvider with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a FakeProvider whose next call returns `response`.
    pub fn with_response(response: &str) -> Self {
        let provider = Self::new();
        provider.push_response(response);
        provider
    }

    /// Create a FakeProvider whose next call fails with `error`.
    pub fn with_error(error: LlmError) -> Self {
        let provider = Self::new();
        provider.push_error(error);
        provider
    }

    /// Set the response used once the queue runs dry.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    pub fn push_response(&self, response: &str) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(Ok(response.to_string()));
        }
    }

    pub fn push_error(&self, error: LlmError) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push_back(Err(error));
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let next = self
            .outcomes
            .lock()
            .ok()
            .and_then(|mut outcomes| outcomes.pop_front());

        let content = match next {
            Some(outcome) => outcome?,
            None => self.default_response.clone().ok_or_else(|| {
                LlmError::RequestFailed("FakeProvider: no response configured".to_string())
            })?,
        };

        Ok(ChatResponse {
            content,
            usage: None,
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
