//! Shared configuration, error handling and wire types for relaychat
//!
//! - Configuration loaded from the environment (12-factor)
//! - HTTP-facing error type with structured JSON bodies
//! - Validating JSON extractor for request bodies
//! - The `ChatRequest` / `ChatReply` wire contract

pub mod config;
pub mod error;
pub mod extractors;
pub mod state;
pub mod wire;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
pub use state::StateError;
pub use wire::{ChatReply, ChatRequest, ErrorBody};
