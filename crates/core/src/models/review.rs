//! Product review record.

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// A customer review of a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: RecordId,
    pub product_id: RecordId,
    /// Display name of the reviewer (not a user reference).
    pub user: String,
    pub rating: u8,
    pub date: String,
    pub content: String,
    #[serde(default)]
    pub helpful_count: u32,
}
