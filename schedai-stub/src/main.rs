//! `SchedAI` stub backend — in-memory REST server for development.
//!
//! Serves the Schedule.ai REST contract from memory, answering in the
//! same irregular shapes the real backend produces. Nothing persists
//! across restarts.
//!
//! ```bash
//! # Run on the default address 127.0.0.1:5000
//! cargo run --bin schedai-stub
//!
//! # Run on a custom address
//! cargo run --bin schedai-stub -- --bind 127.0.0.1:8080
//! ```

use std::sync::Arc;

use clap::Parser;

use schedai_stub::config::{StubCliArgs, StubConfig};
use schedai_stub::routes;
use schedai_stub::store::StubStore;

#[tokio::main]
async fn main() {
    let cli = StubCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match StubConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, "starting schedai stub backend");

    let store = Arc::new(StubStore::new());

    match routes::start_server(&config.bind_addr, store).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "stub backend listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "stub server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start stub server");
            std::process::exit(1);
        }
    }
}
