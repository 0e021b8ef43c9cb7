//! HTTP routes for the record store.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health             - Liveness check
//! POST   /login              - Credential check (bespoke)
//! GET    /stats              - Collection counts + revenue (bespoke)
//!
//! # Generic record routes (resource = users | products | orders | cart |
//! # wishlist | addresses | reviews | categories)
//! GET    /{resource}         - Filtered list (_sort, _order, _limit, {field}_ne)
//! POST   /{resource}         - Create (caller supplies the id)
//! GET    /{resource}/{id}    - Fetch one (404 if absent)
//! PATCH  /{resource}/{id}    - Shallow merge (404 if absent)
//! DELETE /{resource}/{id}    - Delete (404 if absent, not idempotent)
//! ```

pub mod login;
pub mod records;
pub mod stats;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Create the full route table.
///
/// Static routes win over the `/{resource}` captures, so `/login` and
/// `/stats` never reach the generic handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login::login))
        .route("/stats", get(stats::stats))
        .route(
            "/{resource}",
            get(records::list).post(records::create),
        )
        .route(
            "/{resource}/{id}",
            get(records::get_one)
                .patch(records::update)
                .delete(records::remove),
        )
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
