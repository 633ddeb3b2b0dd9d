//! Request handlers.

mod auth;
mod http;
mod profile;
mod websocket;

pub use auth::{login, signup};
pub use http::health_check;
pub use profile::{get_profile, update_profile};
pub use websocket::websocket_handler;
