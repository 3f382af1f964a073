// =============================================================================
// TWSE Technical-Analysis Bot — Main Entry Point
// =============================================================================
//
// A LINE chat bot: a user sends a TWSE stock name or four-digit code, the bot
// fetches recent daily closes, computes MA5/MA20, RSI14 and Bollinger Bands,
// classifies trend, volatility and market structure, and replies with a
// report card.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod advisory;
mod analysis;
mod api;
mod app_state;
mod config;
mod indicators;
mod line;
mod resolver;
mod twse;
mod types;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::config::{BotConfig, Credentials, DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH};

/// How long shutdown waits for chat replies that are still in flight.
const REPLY_DRAIN_GRACE: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        TWSE Technical-Analysis Bot — Starting Up         ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    // ── 2. Config & credentials ──────────────────────────────────────────
    let config_path =
        std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = BotConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        BotConfig::default()
    });
    config.apply_env();

    let credentials = Credentials::from_env();
    for key in credentials.missing() {
        warn!(key, "credential not set — the dependent feature is disabled");
    }

    info!(
        locale = %config.locale,
        aliases = config.aliases.len(),
        history_months = config.history_months,
        "configuration ready"
    );

    // ── 3. Shared state ──────────────────────────────────────────────────
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, credentials)?);

    // ── 4. HTTP server ───────────────────────────────────────────────────
    let app = api::rest::router(state.clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind HTTP server to {bind_addr}"))?;
    info!(addr = %bind_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    // ── 5. Drain in-flight replies ───────────────────────────────────────
    let pending = state.drain_replies(REPLY_DRAIN_GRACE).await;
    info!(pending, "in-flight replies drained");

    info!("TWSE Technical-Analysis Bot shut down complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received — stopping gracefully");
}
