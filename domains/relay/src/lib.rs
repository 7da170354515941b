//! Relay domain: forwards chat messages to the LLM provider

pub mod api;
pub mod domain;

pub use domain::relay::forward;

// Re-export API types
pub use api::routes;
pub use api::RelayState;
