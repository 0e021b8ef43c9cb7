//! Order record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{OrderStatus, RecordId};

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: RecordId,
    pub user_id: RecordId,
    /// Human-facing number, e.g. `ORD-2026-0042`.
    pub order_number: String,
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    /// Append-only history; entries are never rewritten or removed.
    pub timeline: Vec<TimelineEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// A purchased line, copied from the cart at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: RecordId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    #[serde(default)]
    pub selected_options: Map<String, Value>,
}

/// One step in an order's history.
///
/// `status` here is a free label ("ordered", "processing", ...) rather than
/// [`OrderStatus`]: the first entry is written as "ordered" while the order
/// status field starts at `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub status: String,
    pub date: DateTime<Utc>,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wire_shape() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": "o1",
            "userId": "u1",
            "orderNumber": "ORD-2026-0042",
            "items": [{
                "productId": "p1",
                "name": "Widget",
                "price": 10.0,
                "quantity": 2,
            }],
            "subtotal": 20.0,
            "shipping": 5.0,
            "total": 25.0,
            "status": "pending",
            "timeline": [{
                "status": "ordered",
                "date": "2026-01-01T00:00:00Z",
                "description": "Order placed",
            }],
            "createdAt": "2026-01-01T00:00:00Z",
        }))
        .expect("deserialize");

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, Decimal::from(25));

        let json = serde_json::to_value(&order).expect("serialize");
        assert!(json["total"].is_number());
        assert!(json.get("shippingAddress").is_none());
    }
}
