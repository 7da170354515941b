//! Mock LLM Service Implementation
//!
//! Used by `LlmServiceFactory` when provider is `"mock"` and by tests that
//! need a provider stub. Tests that assert on outbound requests opt into
//! recording with [`MockLlmService::recording`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::{CompletionRequest, CompletionResponse, LlmError, LlmService};

const MOCK_MODEL: &str = "mock-model";

/// How the mock answers a completion request
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// `"Mock response to: <last message>"`
    Echo,
    /// Always return this text
    Reply(String),
    /// Always fail with `LlmError::Response(<message>)`
    Fail(String),
}

/// Mock LLM service for testing
#[derive(Debug, Clone)]
pub struct MockLlmService {
    behavior: MockBehavior,
    delay: Option<Duration>,
    /// `None` unless recording was requested
    requests: Option<Arc<Mutex<Vec<CompletionRequest>>>>,
}

impl MockLlmService {
    /// Create a mock that echoes the last message
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::Echo)
    }

    /// Create a mock that always replies with `reply`
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Reply(reply.into()))
    }

    /// Create a mock whose every call fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Fail(message.into()))
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            delay: None,
            requests: None,
        }
    }

    /// Keep every request for [`Self::recorded_requests`]. Clones share the log.
    pub fn recording(mut self) -> Self {
        self.requests = Some(Arc::new(Mutex::new(Vec::new())));
        self
    }

    /// Sleep for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Return all recorded requests. Always empty unless recording.
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        match &self.requests {
            Some(requests) => requests
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone(),
            None => Vec::new(),
        }
    }
}

impl Default for MockLlmService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tracing::debug!(
            messages = request.messages.len(),
            "Mock LLM service processing completion request"
        );

        if let Some(requests) = &self.requests {
            requests
                .lock()
                .map_err(|e| LlmError::Request(format!("requests lock poisoned: {e}")))?
                .push(request.clone());
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let model = if request.model.is_empty() {
            MOCK_MODEL.to_string()
        } else {
            request.model
        };

        let content = match &self.behavior {
            MockBehavior::Echo => {
                let last_message = request
                    .messages
                    .last()
                    .map(|m| m.content.as_str())
                    .unwrap_or("empty");
                format!("Mock response to: {}", last_message)
            }
            MockBehavior::Reply(reply) => reply.clone(),
            MockBehavior::Fail(message) => return Err(LlmError::Response(message.clone())),
        };

        let input_tokens = request
            .messages
            .iter()
            .map(|m| m.content.len() as u32 / 4)
            .sum::<u32>();
        let output_tokens = content.len() as u32 / 4;

        Ok(CompletionResponse {
            content,
            model,
            input_tokens,
            output_tokens,
            stop_reason: "stop".to_string(),
        })
    }

    fn default_model(&self) -> &str {
        MOCK_MODEL
    }
}
