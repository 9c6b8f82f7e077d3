mod app;
mod config;
mod errors;
mod flash;
mod handlers;
mod middleware;
mod models;
mod services;
mod views;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use crate::{
    app::{build_router, AppState},
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;
    let address = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind server to {}", address))?;

    tracing::info!("Server running on {}", address);
    axum::serve(listener, app.into_make_service())
        .await
        .context("Server stopped unexpectedly")?;

    Ok(())
}
