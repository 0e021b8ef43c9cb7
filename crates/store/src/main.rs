//! Voltbay record store - generic JSON-collection backend.
//!
//! This binary serves the record store on port 3000 (configurable).
//!
//! # Architecture
//!
//! - Axum web framework
//! - One JSON file on disk as the database, held in memory while running
//! - Generic CRUD per collection, plus bespoke `/login` and `/stats`
//!
//! The store performs no server-side validation and no transactions;
//! clients own the invariants. See the client crate for the other side of
//! that contract.

#![cfg_attr(not(test), forbid(unsafe_code))]

use voltbay_store::{app, AppState, StoreConfig};
use voltbay_store::db::JsonStore;

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "voltbay_store=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = StoreConfig::from_env().expect("Failed to load configuration");

    let store = JsonStore::open(&config.db_path).expect("Failed to open database file");
    tracing::info!(path = %config.db_path.display(), "Database loaded");

    let addr = config.socket_addr();
    let state = AppState::new(config, store);
    let app = app(state);

    tracing::info!("record store listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
