//! Kaiwa messaging server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaiwa-server -- --port 8080 --restrict-start 21:00 --restrict-end 06:00
//! ```

use std::sync::Arc;

use clap::Parser;
use kaiwa_server::{config::ServerArgs, infrastructure::clock::SystemClock};
use kaiwa_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ServerArgs::parse();
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = kaiwa_server::run_server(config, Arc::new(SystemClock)).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
