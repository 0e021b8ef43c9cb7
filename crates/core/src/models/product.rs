//! Product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::RecordId;

/// A product in the catalog.
///
/// `options` and `specs` are freeform per product (variant axes, spec
/// tables) and stay untyped JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub old_price: Option<Decimal>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: u32,
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub options: Vec<Value>,
    #[serde(default)]
    pub specs: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_is_json_number() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "name": "Wireless Headphones",
            "price": 10.0,
            "category": "audio",
        }))
        .expect("deserialize");
        assert_eq!(product.price, Decimal::new(100, 1));

        let json = serde_json::to_value(&product).expect("serialize");
        assert!(json["price"].is_number());
        assert!(json.get("oldPrice").is_none());
    }

    #[test]
    fn test_old_price_roundtrip() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "p2",
            "name": "Keyboard",
            "price": 49.99,
            "oldPrice": 59.99,
            "category": "accessories",
        }))
        .expect("deserialize");
        assert_eq!(product.old_price, Some(Decimal::new(5999, 2)));
    }
}
