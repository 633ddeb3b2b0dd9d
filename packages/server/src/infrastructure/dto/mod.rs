//! Data Transfer Objects (DTOs) for the support chat.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs
//! - `http`: REST request/response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
