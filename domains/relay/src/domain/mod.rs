//! Relay domain layer

pub mod relay;
