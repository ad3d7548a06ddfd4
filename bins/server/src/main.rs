//! Tally API Server
//!
//! Main entry point for the personal finance backend.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_api::{AppState, create_router};
use tally_shared::config::LogFormat;
use tally_shared::{AppConfig, JwtConfig, JwtService};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tally=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(config.logging.format);
    info!(run_mode = config.run_mode.as_str(), "Configuration loaded");

    let secret = config
        .signing_secret()
        .context("Refusing to start without a signing secret")?;
    let jwt_service = JwtService::new(JwtConfig {
        secret,
        ttl_secs: config.jwt.ttl_secs,
    })
    .context("Invalid jwt.ttl_secs")?;

    let store = tally_store::connect(&config.store).context("Failed to set up content store")?;
    info!(backend = ?config.store.backend, bucket = %config.store.bucket, "Content store ready");

    let state = AppState {
        store,
        jwt_service: Arc::new(jwt_service),
        secure_cookies: config.server.secure_cookies,
    };
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
