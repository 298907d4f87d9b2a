use std::sync::Arc;
use std::time::Duration;

use precis::Summarizer;

/// Shared, immutable service state. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<Summarizer>,
    pub request_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(summarizer: Summarizer) -> Self {
        Self {
            summarizer: Arc::new(summarizer),
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}
