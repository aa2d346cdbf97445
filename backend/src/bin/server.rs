//! RSF occupancy HTTP server binary.
//!
//! Serves the occupancy JSON API and the rendered dashboard page.
//!
//! # Usage
//!
//! ```bash
//! RSF_DATA_PATH=scraped_data2.csv cargo run --bin rsf-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RSF_CONFIG`: Explicit path to an `rsf.toml` config file
//! - `RSF_DATA_PATH`: CSV source (default: scraped_data2.csv)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rsf_occupancy::config::DashboardConfig;
use rsf_occupancy::http::{create_router, AppState};

/// Log filter from `RUST_LOG` directives, falling back to `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(log_filter(env::var("RUST_LOG").ok().as_deref()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting RSF occupancy server");

    let config = DashboardConfig::load().context("Failed to load configuration")?;
    info!("Data source: {}", config.data_path.display());
    if config.allow_source_override {
        info!("Source override via ?path= is enabled");
    }

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_address()))?;

    // Create application state
    let state = AppState::new(config);

    // Create router with all endpoints
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Dashboard: http://{}/v1/dashboard", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
