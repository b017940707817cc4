//! `cipher-gate` — gateway binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (tracing, plus OTLP when configured).
//! 3. Build the rule engine for the configured policy and the cipher-service client.
//! 4. Build the Axum router and start the HTTP server.

mod config;
mod downstream;
mod server;
mod telemetry;

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use validation::Validator;

use config::Config;
use downstream::CipherClient;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        downstream = %cfg.cipher_service_url,
        "cipher-gate starting"
    );

    // -----------------------------------------------------------------------
    // 3. Rule engine and cipher-service client
    // -----------------------------------------------------------------------
    let policy = cfg.policy();
    info!(?policy, "validation policy");
    let validator = Validator::new(policy);
    let client = CipherClient::new(
        &cfg.cipher_service_url,
        Duration::from_secs(cfg.downstream_timeout_secs),
    );

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(validator, client);
    let router = server::router::build(state, Duration::from_secs(cfg.request_timeout_secs));

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");
    axum::serve(listener, router).await?;

    Ok(())
}
