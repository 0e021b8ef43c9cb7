//! Client-side error taxonomy.
//!
//! Every service function propagates with `?`; nothing here retries, and
//! no error escalates to a global handler. Callers surface one message per
//! failure and abandon the operation.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by the API client and the services built on it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The record (or resource) does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// A business rule was violated, detected by a pre-query (duplicate
    /// email, duplicate wishlist entry). Not a real HTTP conflict status.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Client-side validation failed before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Credentials rejected (HTTP 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Transport-level failure (connection refused, invalid body, ...).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A non-2xx status with no structured mapping.
    #[error("unexpected status: {0}")]
    UnexpectedStatus(StatusCode),

    /// A response body that does not match the declared record shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Reading or writing the persisted identity failed.
    #[error("identity storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    /// Is this a definitive "record does not exist", as opposed to a
    /// transient transport failure? Session rehydration keys off this.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ClientError::Conflict("email already registered".to_owned());
        assert_eq!(err.to_string(), "conflict: email already registered");
    }

    #[test]
    fn test_is_not_found() {
        assert!(ClientError::NotFound("users/x".to_owned()).is_not_found());
        assert!(!ClientError::Unauthorized("nope".to_owned()).is_not_found());
    }
}
