//! Generic record route handlers.
//!
//! One handler per verb, shared by every collection. The only
//! resource-specific behavior is that `users` responses never include the
//! `password` field.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use voltbay_core::Resource;

use crate::db::query::ListQuery;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// `GET /{resource}` - filtered list.
pub async fn list(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>> {
    let resource = resolve(&resource)?;
    let query = ListQuery::from_params(&params);
    let records = state.store().list(resource, &query).await;
    let records = records
        .into_iter()
        .map(|r| sanitize(resource, r))
        .collect();
    Ok(Json(Value::Array(records)))
}

/// `GET /{resource}/{id}` - fetch one record.
pub async fn get_one(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let resource = resolve(&resource)?;
    let record = state
        .store()
        .get(resource, &id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("{resource}/{id} not found")))?;
    Ok(Json(sanitize(resource, record)))
}

/// `POST /{resource}` - create a record.
///
/// The payload is stored verbatim; the store assigns no id.
pub async fn create(
    State(state): State<AppState>,
    Path(resource): Path<String>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>)> {
    let resource = resolve(&resource)?;
    let stored = state.store().insert(resource, payload).await?;
    Ok((StatusCode::CREATED, Json(sanitize(resource, stored))))
}

/// `PATCH /{resource}/{id}` - shallow merge, returns the merged record.
pub async fn update(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> Result<Json<Value>> {
    let resource = resolve(&resource)?;
    let merged = state.store().update(resource, &id, patch).await?;
    Ok(Json(sanitize(resource, merged)))
}

/// `DELETE /{resource}/{id}` - delete a record.
///
/// Repeat deletes fail with 404; idempotency is not guaranteed.
pub async fn remove(
    State(state): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let resource = resolve(&resource)?;
    state.store().remove(resource, &id).await?;
    Ok(Json(Value::Object(serde_json::Map::new())))
}

fn resolve(segment: &str) -> Result<Resource> {
    Resource::from_path(segment)
        .ok_or_else(|| AppError::NotFound(format!("unknown resource: {segment}")))
}

/// Strip fields that must never leave the store.
fn sanitize(resource: Resource, mut record: Value) -> Value {
    if resource == Resource::Users
        && let Some(fields) = record.as_object_mut()
    {
        fields.remove("password");
    }
    record
}
