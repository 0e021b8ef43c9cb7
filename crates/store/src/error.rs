//! Unified error handling for the record store.
//!
//! Provides a unified `AppError` type mapping every failure to a status code
//! and a JSON `{"error": ...}` body. All route handlers return
//! `Result<T, AppError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

/// Application-level error type for the record store.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Resource or record not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Login failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Store(StoreError::Io(_)) | Self::Internal(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Store(err) => match err {
                StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                StoreError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
                StoreError::Io(_) | StoreError::Corrupt(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(StoreError::Io(_) | StoreError::Corrupt(_)) | Self::Internal(_) => {
                "Internal server error".to_owned()
            }
            Self::Store(StoreError::NotFound { resource, id }) => {
                format!("{resource}/{id} not found")
            }
            Self::Store(StoreError::InvalidPayload(msg)) => msg.clone(),
            Self::NotFound(msg) => msg.clone(),
            Self::Unauthorized(msg) | Self::BadRequest(msg) => msg.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
