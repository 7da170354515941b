//! Single-turn forwarding of a chat message to the provider
//!
//! Only the latest message is sent; the provider keeps no memory of
//! earlier turns.

use std::time::Duration;

use relaychat_common::{Error, Result};
use relaychat_llm::{CompletionRequest, LlmError, LlmService};

/// Forward `message` to the provider and return its completion text verbatim.
///
/// The call is bounded by `timeout`. Every provider failure comes back as a
/// structured `Error`.
pub async fn forward(llm: &dyn LlmService, message: &str, timeout: Duration) -> Result<String> {
    let request = CompletionRequest::single_turn(message);

    tracing::debug!(model = %llm.default_model(), "Forwarding message to provider");

    match tokio::time::timeout(timeout, llm.complete(request)).await {
        Ok(Ok(response)) => {
            tracing::debug!(
                model = %response.model,
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                "Provider completion received"
            );
            Ok(response.content)
        }
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Provider call failed");
            Err(provider_error(e))
        }
        Err(_) => {
            tracing::warn!(timeout = ?timeout, "Provider call timed out");
            Err(Error::Timeout(format!(
                "no reply within {}s",
                timeout.as_secs_f32()
            )))
        }
    }
}

fn provider_error(err: LlmError) -> Error {
    match err {
        LlmError::Timeout(after) => {
            Error::Timeout(format!("no reply within {}s", after.as_secs_f32()))
        }
        LlmError::Configuration(msg) => Error::Internal(format!("LLM misconfigured: {}", msg)),
        other => Error::Upstream(other.to_string()),
    }
}
