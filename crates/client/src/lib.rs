//! Chat client for the relaychat relay
//!
//! Owns the conversation transcript and the single-request-in-flight state
//! machine, and talks to the relay over HTTP.

pub mod client;
pub mod domain;
pub mod render;
pub mod reveal;
pub mod session;
pub mod transport;

pub use client::ChatClient;
pub use domain::entities::{Message, Sender, Transcript};
pub use domain::state::{ClientEvent, ClientPhase, ClientStateMachine, StateError};
pub use session::{ConversationState, SessionOptions, SubmitOutcome};
pub use transport::{ClientConfig, HttpRelayClient, RelayTransport, TransportError};
