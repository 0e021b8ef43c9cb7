//! Opaque record identifiers.
//!
//! The record store assigns no ids; callers generate them before a create.
//! Ids are strings of the form `{millis-base36}-{6 random base36 chars}`,
//! which keeps them sortable-ish by creation time and unique enough for a
//! single-writer store.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

const RANDOM_SUFFIX_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// An opaque record id, valid for any collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh id from the current time and a random suffix.
    #[must_use]
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
        let mut rng = rand::rng();
        let suffix: String = (0..RANDOM_SUFFIX_LEN)
            .map(|_| {
                let idx = rng.random_range(0..BASE36.len());
                char::from(BASE36[idx])
            })
            .collect();
        Self(format!("{}-{suffix}", to_base36(millis)))
    }

    /// Wrap an existing id string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encode an unsigned integer in lowercase base36.
fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while n > 0 {
        let rem = (n % 36) as usize;
        // rem < 36 by construction
        digits.push(BASE36.get(rem).copied().unwrap_or(b'0'));
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
