//! HTTP transport from the chat client to the relay service

use std::time::Duration;

use relaychat_common::{ChatReply, ChatRequest, ErrorBody};
use thiserror::Error;

const DEFAULT_RELAY_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything that can make a chat turn fail on the client side
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Client configuration error: {0}")]
    Configuration(String),

    #[error("Request to relay timed out")]
    Timeout,

    #[error("Connection to relay failed: {0}")]
    Connection(String),

    #[error("Relay returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed relay reply: {0}")]
    Malformed(String),
}

/// Client-side configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the relay, without the `/api/chat` path
    pub relay_url: String,
    /// Bound on a single chat request
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Create client config from `RELAY_URL` and `CHAT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, TransportError> {
        dotenvy::dotenv().ok();

        let timeout_secs = match std::env::var("CHAT_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                TransportError::Configuration(format!(
                    "CHAT_TIMEOUT_SECS must be a number of seconds, got {raw:?}"
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            relay_url: std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Sends one chat request to the relay.
#[async_trait::async_trait]
pub trait RelayTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError>;
}

/// reqwest-backed transport that POSTs to `{relay_url}/api/chat`.
pub struct HttpRelayClient {
    http: reqwest::Client,
    chat_url: String,
}

impl HttpRelayClient {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let chat_url = format!("{}/api/chat", config.relay_url.trim_end_matches('/'));
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;

        Ok(Self { http, chat_url })
    }
}

fn request_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Connection(e.to_string())
    }
}

#[async_trait::async_trait]
impl RelayTransport for HttpRelayClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, TransportError> {
        let response = self
            .http
            .post(&self.chat_url)
            .json(request)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(request_error)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ChatReply = serde_json::from_slice(&body)
            .map_err(|e| TransportError::Malformed(e.to_string()))?;

        tracing::debug!(chars = reply.reply.chars().count(), "Relay reply received");
        Ok(reply)
    }
}
