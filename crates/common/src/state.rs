//! Common state machine error types

use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Invalid transition: event {event} is not accepted in state {from}")]
    InvalidTransition { from: String, event: String },
}
