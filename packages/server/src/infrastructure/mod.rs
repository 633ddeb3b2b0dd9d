//! Infrastructure layer: concrete stores, transports and wire formats.

pub mod credential;
pub mod dto;
pub mod message_pusher;
pub mod repository;
