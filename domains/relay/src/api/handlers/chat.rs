//! Chat relay handler

use axum::{extract::State, Json};
use relaychat_common::{ChatReply, ChatRequest, Result, ValidatedJson};

use crate::api::middleware::RelayState;
use crate::domain::relay;

/// Relay one message to the provider and return its reply
pub async fn send_chat(
    State(state): State<RelayState>,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatReply>> {
    tracing::info!(chars = req.message.chars().count(), "Received chat message");

    let reply = relay::forward(state.llm.as_ref(), &req.message, state.provider_timeout).await?;

    Ok(Json(ChatReply { reply }))
}
