//! Server startup and shutdown logic.
//!
//! This module contains the `run_server` function which handles:
//! - Upstream client creation
//! - Application state creation
//! - Router creation
//! - Server binding and graceful shutdown

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::origin::AllowedOrigins;
use crate::routes;
use crate::state::AppState;
use crate::upstream::Forwarder;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Build the shared application state from configuration.
pub fn build_state(config: &Config) -> AppResult<Arc<AppState>> {
    let forwarder = Forwarder::new(&config.upstream)?;
    let allowed_origins = AllowedOrigins::new(config.cors.allowed_origins.iter().cloned());

    Ok(Arc::new(AppState::new(forwarder, allowed_origins)))
}

/// Run the web server with the given configuration.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `addr` - The address to bind the server to (e.g., "0.0.0.0:3001")
///
/// # Errors
///
/// This function will return an error if:
/// - The upstream HTTP client cannot be built
/// - Server binding fails
/// - Server runtime error occurs
pub async fn run_server(config: Config, addr: String) -> AppResult<()> {
    info!("Starting Pokemon TCG API proxy...");

    let state = build_state(&config)?;

    if config.upstream.api_key.is_none() {
        warn!("POKEMON_TCG_API_KEY is not set; upstream requests are unauthenticated");
    }
    if state.allowed_origins.is_empty() {
        warn!("No allowed origins configured; every browser request will be rejected");
    }

    let app = routes::create_router(state.clone());

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to address {}: {}", addr, e)))?;

    info!("Server listening on {}", addr);
    info!(
        upstream = %config.upstream.base_url,
        timeout_seconds = config.upstream.timeout_seconds,
        allowed_origins = state.allowed_origins.len(),
        "Forwarding to upstream"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(create_shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create a future that resolves when a shutdown signal is received.
///
/// On Unix-like systems, this listens for both Ctrl+C (SIGINT) and SIGTERM.
/// On other platforms, it only listens for Ctrl+C.
///
/// # Panics
///
/// Panics if signal handler installation fails; without a handler the
/// process cannot shut down gracefully at all.
async fn create_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}
