use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{CompletionClient, CompletionRequest};
use crate::errors::AppError;

/// Scripted completion client for tests and offline runs.
///
/// Responses are popped from the script in call order; once the script is
/// exhausted every call returns the default response. All received
/// requests are recorded so tests can assert on prompt construction.
pub struct MockCompletionClient {
    script: Mutex<VecDeque<Result<String, AppError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    default_response: String,
    calls: AtomicUsize,
}

impl MockCompletionClient {
    pub fn new(default_response: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_response: default_response.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_script(script: Vec<Result<String, AppError>>) -> Self {
        let client = Self::new("mock completion");
        *client.script.lock().expect("script lock") = script.into();
        client
    }

    /// Number of completion calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("requests lock").push(request);

        let scripted = self.script.lock().expect("script lock").pop_front();
        scripted.unwrap_or_else(|| Ok(self.default_response.clone()))
    }
}
