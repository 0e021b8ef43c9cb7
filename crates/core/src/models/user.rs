//! User record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, RecordId};

/// A registered user.
///
/// `password` holds the argon2 hash, is only ever serialized when present
/// (the registration POST), and never comes back from the store: the server
/// strips it from every `users` response including `/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    /// Base64 image data, or empty when unset.
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// User initials for avatar placeholders, e.g. "JD" for Jane Doe.
    #[must_use]
    pub fn initials(&self) -> String {
        let first = self.first_name.chars().next();
        let last = self.last_name.chars().next();
        first
            .into_iter()
            .chain(last)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
