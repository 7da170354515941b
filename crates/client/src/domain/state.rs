//! State machine for the chat client's request lifecycle
//!
//! Client phases: Idle → Awaiting → Idle. At most one request is in flight.

pub use relaychat_common::StateError;
use serde::{Deserialize, Serialize};

/// Request lifecycle phase of a chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientPhase {
    /// No request outstanding; input is accepted
    #[default]
    Idle,
    /// A request has been issued and not yet resolved
    Awaiting,
}

impl ClientPhase {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Awaiting)
    }
}

impl std::fmt::Display for ClientPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Awaiting => write!(f, "awaiting"),
        }
    }
}

/// Events that drive the client through its phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientEvent {
    /// User submitted non-blank text
    Submit,
    /// Relay answered with a reply
    ReplyReceived,
    /// Transport error, non-2xx status, timeout or malformed reply
    RequestFailed,
}

impl std::fmt::Display for ClientEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Submit => write!(f, "submit"),
            Self::ReplyReceived => write!(f, "reply_received"),
            Self::RequestFailed => write!(f, "request_failed"),
        }
    }
}

/// Client state machine
pub struct ClientStateMachine;

impl ClientStateMachine {
    /// Attempt a phase transition
    pub fn transition(current: ClientPhase, event: ClientEvent) -> Result<ClientPhase, StateError> {
        match (current, event) {
            (ClientPhase::Idle, ClientEvent::Submit) => Ok(ClientPhase::Awaiting),
            (ClientPhase::Awaiting, ClientEvent::ReplyReceived | ClientEvent::RequestFailed) => {
                Ok(ClientPhase::Idle)
            }
            _ => Err(StateError::InvalidTransition {
                from: current.to_string(),
                event: event.to_string(),
            }),
        }
    }
}
