//! Address record.

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// A user's saved shipping address.
///
/// At most one address per user should have `is_default` set; the client
/// enforces this with an unset-then-set sequence (not transactional).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: RecordId,
    pub user_id: RecordId,
    /// Display label, e.g. "Home" or "Work".
    pub label: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub zip_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub is_default: bool,
}
