//! Wishlist entry record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::RecordId;

/// A saved product on a user's wishlist.
///
/// At most one entry per (user, product) pair; the add flow pre-checks for
/// duplicates before posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: RecordId,
    pub user_id: RecordId,
    pub product_id: RecordId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    pub added_at: DateTime<Utc>,
}
