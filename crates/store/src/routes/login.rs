//! Bespoke `POST /login` endpoint.
//!
//! A linear scan of the `users` collection by email, with argon2
//! verification against the stored hash. Returns the user without the
//! `password` field, or 401 with a JSON error body.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use voltbay_core::Resource;

use crate::auth::verify_password;
use crate::db::query::ListQuery;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /login`.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>> {
    let params = std::iter::once(("email".to_owned(), body.email.clone())).collect();
    let query = ListQuery::from_params(&params);
    let candidates = state.store().list(Resource::Users, &query).await;

    let mut user = candidates
        .into_iter()
        .find(|user| {
            user.get("password")
                .and_then(Value::as_str)
                .is_some_and(|hash| verify_password(&body.password, hash))
        })
        .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_owned()))?;

    if let Some(fields) = user.as_object_mut() {
        fields.remove("password");
    }

    tracing::info!(email = %body.email, "login succeeded");
    Ok(Json(user))
}
