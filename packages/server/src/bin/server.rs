//! Live support chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin madoguchi-server
//! cargo run --bin madoguchi-server -- --host 0.0.0.0 --port 3000 --unknown-target drop
//! ```

use clap::Parser;
use madoguchi_server::{
    app::build_state,
    config::{ServerArgs, ServerConfig},
    ui::Server,
};
use madoguchi_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(ServerArgs::parse());
    tracing::info!(
        "Unknown reply targets: {:?}, anonymous staff entry: {}",
        config.unknown_target,
        config.anonymous_staff
    );

    let state = match build_state(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let server = Server::new(state);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
