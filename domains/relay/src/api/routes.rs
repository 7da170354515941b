//! Route definitions for Relay domain API

use axum::{routing::post, Router};

use super::handlers::chat;
use super::middleware::RelayState;

/// Create all Relay domain API routes
pub fn routes() -> Router<RelayState> {
    Router::new().route("/api/chat", post(chat::send_chat))
}
