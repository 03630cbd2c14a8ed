//! Event Relay - Binary Entry Point
//!
//! Loads configuration from the environment and serves the HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use event_relay::api::{create_router, AppState};
use event_relay::config::RelayConfig;
use event_relay::utils::time::format_tz_offset;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::from_env().context("invalid configuration")?;

    match config.max_logs {
        Some(max) => tracing::info!(max_logs = max, "event log bounded"),
        None => tracing::warn!("event log unbounded, memory grows with every event"),
    }
    tracing::info!(
        window_hours = config.window.window_hours(),
        bucket_minutes = config.window.bucket_minutes(),
        tz_offset = %format_tz_offset(config.window.tz_offset_minutes()),
        mixpanel = config.mixpanel_token.is_some(),
        posthog = config.posthog_key.is_some(),
        "relay configured"
    );

    let state = Arc::new(AppState::from_config(&config));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
