//! Live support chat server.
//!
//! Clients talk to staff over WebSocket; every client conversation is kept as
//! an append-only history that is replayed on reconnect.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
