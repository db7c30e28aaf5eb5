//! `pibox serve` - run the intake and gallery server.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::Path;
use tracing::info;

use crate::http::{AppState, router};

/// Start the server and run until Ctrl-C / SIGTERM.
pub async fn execute(config_path: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = super::load_config(config_path)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let state = AppState::new(config);
    // Create the store up front so permission problems surface at startup
    if let Err(e) = state.store.ensure_dir() {
        tracing::warn!(error = %e, "Store directory not available yet");
    }

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        %addr,
        store = %state.store.dir().display(),
        max_file_size = state.config.upload.max_file_size,
        listing_requires_key = state.config.gallery.require_key_for_listing,
        "Gallery server listening"
    );

    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
