//! Client domain layer: transcript entities and the request state machine

pub mod entities;
pub mod state;
