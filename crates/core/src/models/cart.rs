//! Cart line-item record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::RecordId;

/// One line in a user's cart.
///
/// Display fields (`name`, `price`, `image`) are denormalized copies of the
/// product at add time; they do not follow later product edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: RecordId,
    pub user_id: RecordId,
    pub product_id: RecordId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    /// Clamped to >= 1 client-side; the store does not validate.
    pub quantity: u32,
    #[serde(default)]
    pub selected_options: Map<String, Value>,
}

impl CartItem {
    /// Line total, treating a zero quantity as one (legacy records).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity.max(1))
    }
}
