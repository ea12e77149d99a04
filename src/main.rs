//! citycache - A query result cache with a city directory service in front
//!
//! Serves cached city queries over HTTP and keeps the cache fresh with a
//! periodic expiry sweep and write-driven invalidation.

use std::net::SocketAddr;

use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use citycache::api::create_router;
use citycache::{spawn_stats_report_task, spawn_sweep_task, AppState, Config};

/// Main entry point for the city directory cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create query cache and seeded repository
/// 4. Start background expiry sweep and stats report tasks
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "citycache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting city directory cache server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, default_ttl_ms={}, sweep_interval={}s, stats_interval={}s, port={}",
        config.max_entries,
        config.default_ttl_ms,
        config.sweep_interval,
        config.stats_interval,
        config.server_port
    );

    // Create application state with cache and repository
    let state = AppState::from_config(&config);
    info!("Query cache initialized");

    // Start background tasks
    let sweep_handle = spawn_sweep_task(state.cache.store(), config.sweep_interval);
    let stats_handle = spawn_stats_report_task(state.cache.store(), config.stats_interval);
    info!("Background tasks started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(vec![sweep_handle, stats_handle]))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the background tasks so no dangling timers
/// keep the process alive.
async fn shutdown_signal(background_handles: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the background tasks
    for handle in background_handles {
        handle.abort();
    }
    warn!("Background tasks aborted");
}
