//! Bespoke `GET /stats` endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use voltbay_core::Resource;

use crate::db::query::ListQuery;
use crate::error::Result;
use crate::state::AppState;

/// Store-wide counters.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    /// Sum of order totals; 0 when there are no orders.
    pub revenue: f64,
}

/// `GET /stats`.
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let store = state.store();
    let orders = store.list(Resource::Orders, &ListQuery::default()).await;

    let revenue = orders
        .iter()
        .filter_map(|order| order.get("total").and_then(Value::as_f64))
        .sum();

    Ok(Json(StatsResponse {
        users: store.len(Resource::Users).await,
        products: store.len(Resource::Products).await,
        orders: orders.len(),
        revenue,
    }))
}
