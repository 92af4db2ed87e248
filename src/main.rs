//! Toronto 311 Dashboard Server
//!
//! Run with: cargo run --bin toronto311
//!
//! # Configuration
//!
//! Read from `config.toml` (see `toronto311-cli config`), with environment
//! overrides:
//! - `TORONTO311_API_URL`: Backend API base (default: http://localhost:5000/api)
//! - `TORONTO311_HOST`: Host to bind to (default: 127.0.0.1)
//! - `TORONTO311_PORT`: Port to listen on (default: 8084)
//! - `TORONTO311_LOG_LEVEL`, `TORONTO311_LOG_FORMAT`: Logging (info, pretty)
//! - `RUST_LOG`: Full filter directive, takes precedence over the log level

use std::sync::Arc;

use toronto311::api::BackendClient;
use toronto311::config::{Config, LoggingConfig};
use toronto311::dashboard;
use toronto311::page::Document;
use toronto311::server::{serve, ServerState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_logging(&config.logging);

    tracing::info!("Starting Toronto 311 dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend API: {}", config.backend.normalized_base_url());

    let backend = Arc::new(BackendClient::new(&config.backend)?);

    let mut page = Document::dashboard();
    dashboard::bootstrap(&mut page);

    let state = ServerState::new(backend, page);

    // First load runs alongside the server; the page shows "Loading..." until it lands
    let initial = state.clone();
    tokio::spawn(async move {
        initial.refresh().await;
    });

    tracing::info!("Starting server on {}", config.server.addr());
    serve(state, &config.server).await?;

    tracing::info!("Toronto 311 dashboard stopped");
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| config.filter_directive().into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
