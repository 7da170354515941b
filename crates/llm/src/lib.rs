//! relaychat LLM Service
//!
//! Text-completion providers behind a single `LlmService` trait:
//! - Groq chat completions (OpenAI-compatible) for production
//! - A scriptable mock for tests and local development

pub mod groq;
pub mod mock;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use groq::GroqService;
pub use mock::MockLlmService;

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM configuration error: {0}")]
    Configuration(String),

    #[error("LLM request error: {0}")]
    Request(String),

    #[error("LLM response error: {0}")]
    Response(String),

    #[error("LLM provider rate limit exceeded")]
    RateLimit,

    #[error("LLM request timed out after {0:?}")]
    Timeout(Duration),
}

/// Role of a message sent to the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmRole {
    User,
    Assistant,
}

impl LlmRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmRole::User => "user",
            LlmRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: LlmRole,
    pub content: String,
}

impl LlmMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::User,
            content: content.into(),
        }
    }
}

/// A completion request. An empty `model` selects the provider default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: Option<String>,
    pub messages: Vec<LlmMessage>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// A single-turn prompt with provider defaults for everything else
    pub fn single_turn(prompt: impl Into<String>) -> Self {
        Self {
            model: String::new(),
            system_prompt: None,
            messages: vec![LlmMessage::user(prompt)],
            max_tokens: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub stop_reason: String,
}

/// LLM provider configuration.
#[derive(Clone)]
pub struct LlmConfig {
    /// Provider (groq, mock)
    pub provider: String,
    pub api_key: String,
    /// Overrides the provider's default base URL
    pub base_url: Option<String>,
    pub default_model: String,
    pub max_tokens: Option<u32>,
    /// Bound on a single outbound provider call
    pub timeout: Duration,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LlmConfig {
    /// Mock provider config with default model and timeout
    pub fn mock() -> Self {
        Self {
            provider: "mock".to_string(),
            api_key: String::new(),
            base_url: None,
            default_model: DEFAULT_MODEL.to_string(),
            max_tokens: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create LLM config from environment variables.
    ///
    /// The provider defaults to `groq` when `GROQ_API_KEY` is present and to
    /// `mock` otherwise.
    pub fn from_env() -> Result<Self, LlmError> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("GROQ_API_KEY").unwrap_or_default();

        let provider = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| {
            if api_key.is_empty() {
                "mock".to_string()
            } else {
                "groq".to_string()
            }
        });

        if provider == "groq" && api_key.is_empty() {
            return Err(LlmError::Configuration(
                "GROQ_API_KEY is required for Groq provider".to_string(),
            ));
        }

        let max_tokens = match std::env::var("LLM_MAX_TOKENS") {
            Ok(raw) => Some(raw.parse().map_err(|_| {
                LlmError::Configuration(format!("LLM_MAX_TOKENS must be a number, got {raw:?}"))
            })?),
            Err(_) => None,
        };

        let timeout_secs = match std::env::var("LLM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                LlmError::Configuration(format!(
                    "LLM_TIMEOUT_SECS must be a number of seconds, got {raw:?}"
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            provider,
            api_key,
            base_url: std::env::var("LLM_BASE_URL").ok(),
            default_model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_tokens,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// LLM service trait for different provider implementations.
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Run one completion against the provider.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model used when a request leaves `model` empty.
    fn default_model(&self) -> &str;
}

/// Factory for creating LlmService implementations.
pub struct LlmServiceFactory;

impl LlmServiceFactory {
    /// Create an LlmService based on configuration.
    pub fn create(config: LlmConfig) -> Result<Box<dyn LlmService>, LlmError> {
        match config.provider.as_str() {
            "groq" => {
                tracing::info!(model = %config.default_model, "Creating Groq LLM service");
                Ok(Box::new(GroqService::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock LLM service");
                Ok(Box::new(Self::mock_service()))
            }
            provider => Err(LlmError::Configuration(format!(
                "Unknown LLM provider: {}. Supported providers: groq, mock",
                provider
            ))),
        }
    }

    /// Mock served when no provider key is configured; keeps no request history
    fn mock_service() -> MockLlmService {
        MockLlmService::new()
    }
}
