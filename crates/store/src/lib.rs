//! Voltbay record store library.
//!
//! This crate provides the record-store server as a library, allowing it to
//! be mounted in-process by integration tests as well as run as a binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;

pub use config::StoreConfig;
pub use state::AppState;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router.
///
/// Bespoke endpoints (`/login`, `/stats`, `/health`) are registered before
/// the generic `/{resource}` routes so they take precedence.
#[must_use]
pub fn app(state: AppState) -> Router {
    routes::routes()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
