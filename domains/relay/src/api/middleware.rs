//! Relay domain state

use relaychat_llm::LlmService;
use std::sync::Arc;
use std::time::Duration;

/// Application state for the Relay domain
#[derive(Clone)]
pub struct RelayState {
    pub llm: Arc<dyn LlmService>,
    /// Bound on a single provider call
    pub provider_timeout: Duration,
}

impl RelayState {
    pub fn new(llm: Arc<dyn LlmService>, provider_timeout: Duration) -> Self {
        Self {
            llm,
            provider_timeout,
        }
    }
}
