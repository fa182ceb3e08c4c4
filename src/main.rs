use anyhow::{Context, Result};
use std::io::ErrorKind;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
mod views;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // --- Parse config ---
    let cfg = config::AppConfig::from_env_and_args()?;

    tracing::info!("Starting quickav with config: {:?}", cfg);

    // --- Shared HTTP client + state ---
    let client = reqwest::Client::builder()
        .user_agent(concat!("quickav/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;
    let state = state::AppState::from_config(&cfg, client);

    // --- Ensure temp directory exists ---
    state
        .intake
        .ensure_temp_dir()
        .await
        .with_context(|| format!("creating temp dir {}", cfg.temp_dir.display()))?;
    tracing::info!("Buffering uploads in {}", cfg.temp_dir.display());

    let public_dir = match cfg.public_dir.clone() {
        Some(dir) if dir.is_dir() => Some(dir),
        Some(dir) => {
            tracing::warn!("Public directory {} not found; skipping", dir.display());
            None
        }
        None => None,
    };

    // --- Build router ---
    let app = routes::routes::app(state, public_dir);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server running on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve on Ctrl-C so in-flight uploads finish and clean their buffers.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
