//! Configuration management following 12-factor app principles
//!
//! Server configuration is loaded from environment variables. Provider
//! settings live with the provider (`relaychat_llm::LlmConfig`).

use anyhow::Result;
use std::env;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port for the relay
    pub port: u16,

    /// Allowed CORS origins; `None` means any origin
    pub cors_allowed_origins: Option<Vec<String>>,

    /// Upper bound on accepted request bodies
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let port = match env::var("PORT_NUMBER").or_else(|_| env::var("PORT")) {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT_NUMBER must be a valid port, got {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let max_body_bytes = match env::var("MAX_BODY_BYTES") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a byte count, got {raw:?}"))?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            port,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .and_then(|raw| parse_origins(&raw)),
            max_body_bytes,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_allowed_origins: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Split a comma-separated origin list. `*` or an empty list means any origin.
fn parse_origins(raw: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        None
    } else {
        Some(origins)
    }
}
