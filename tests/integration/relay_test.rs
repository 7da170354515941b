//! End-to-end tests: chat client → relay over HTTP → mock provider

mod chat;
mod common;
mod session;
