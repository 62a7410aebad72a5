//! Record server entry point
//!
//! Serves the client, airline and flight API over HTTP until SIGINT or
//! SIGTERM. With autosave disabled, all collections are written to disk
//! after the server stops accepting requests.

use airdesk::{api::create_router, config::Config, logging, state::AppState};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "airdesk-server", version, about = "Client, airline and flight records API")]
struct Args {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the JSON record files
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration first to get logging settings
    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    let _logging_guard = logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting record server");

    let addr = config
        .socket_addr()
        .context("Failed to determine socket address")?;

    tracing::info!(
        data_dir = %config.storage.data_dir.display(),
        autosave = config.storage.autosave,
        listen_addr = %addr,
        "Configuration loaded"
    );

    let prefix = config.api_prefix();
    let state = AppState::new(config).context("Failed to open record store")?;
    let app = create_router(state.clone());

    tracing::info!("Record server listening on http://{}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API endpoint: http://{}{}", addr, prefix);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener on {addr}"))?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server terminated unexpectedly");
    }

    if !state.config.storage.autosave {
        tracing::info!("Writing record files...");
        state.flush().context("Failed to write record files")?;
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler, waiting for SIGINT only");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    let sigint = tokio::signal::ctrl_c();

    tokio::select! {
        _ = sigint => {
            tracing::info!("SIGINT received, starting graceful shutdown...");
        }
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received, starting graceful shutdown...");
        }
    }
}

/// Wait for shutdown signal (SIGINT only on non-Unix platforms)
#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for CTRL+C");
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
