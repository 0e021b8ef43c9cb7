//! Order service.
//!
//! Orders are created in `pending` with a seeded timeline; status updates
//! append to the timeline, never rewrite it.

use chrono::{Datelike, Utc};
use serde_json::{json, Value};

use voltbay_core::{Order, OrderItem, OrderStatus, RecordId, Resource, TimelineEntry};

use crate::api::{Query, StoreClient};
use crate::error::ClientError;

/// Order service.
#[derive(Clone)]
pub struct OrderService {
    client: StoreClient,
}

impl OrderService {
    /// Create a new order service.
    #[must_use]
    pub const fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// All orders for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn for_user(&self, user_id: &RecordId) -> Result<Vec<Order>, ClientError> {
        self.client
            .fetch_collection(
                Resource::Orders,
                &Query::new().filter("userId", user_id).sort_desc("createdAt"),
            )
            .await
    }

    /// A user's orders in one status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn by_status(
        &self,
        user_id: &RecordId,
        status: OrderStatus,
    ) -> Result<Vec<Order>, ClientError> {
        self.client
            .fetch_collection(
                Resource::Orders,
                &Query::new()
                    .filter("userId", user_id)
                    .filter("status", status)
                    .sort_desc("createdAt"),
            )
            .await
    }

    /// A single order by id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn by_id(&self, id: &RecordId) -> Result<Order, ClientError> {
        self.client.fetch_by_id(Resource::Orders, id.as_str()).await
    }

    /// Place an order from checkout.
    ///
    /// Generates the order number, starts the status at `pending`, and
    /// seeds the timeline with an "ordered" entry. `total` is
    /// `subtotal + shipping`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` if there are no items.
    pub async fn place(
        &self,
        user_id: &RecordId,
        items: Vec<OrderItem>,
        shipping: rust_decimal::Decimal,
        shipping_address: Option<Value>,
    ) -> Result<Order, ClientError> {
        if items.is_empty() {
            return Err(ClientError::Validation(
                "an order needs at least one item".to_owned(),
            ));
        }

        let now = Utc::now();
        let subtotal: rust_decimal::Decimal = items
            .iter()
            .map(|item| item.price * rust_decimal::Decimal::from(item.quantity.max(1)))
            .sum();

        let order = Order {
            id: RecordId::generate(),
            user_id: user_id.clone(),
            order_number: generate_order_number(),
            items,
            subtotal,
            shipping,
            total: subtotal + shipping,
            status: OrderStatus::Pending,
            timeline: vec![TimelineEntry {
                status: "ordered".to_owned(),
                date: now,
                description: "Order placed".to_owned(),
            }],
            shipping_address,
            created_at: now,
        };
        self.client.create(Resource::Orders, &order).await
    }

    /// Move an order to a new status, appending a timeline entry.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the order is absent.
    pub async fn update_status(
        &self,
        id: &RecordId,
        status: OrderStatus,
        description: &str,
    ) -> Result<Order, ClientError> {
        let order = self.by_id(id).await?;

        let mut timeline = order.timeline;
        timeline.push(TimelineEntry {
            status: status.as_str().to_owned(),
            date: Utc::now(),
            description: description.to_owned(),
        });

        self.client
            .update(
                Resource::Orders,
                id.as_str(),
                &json!({ "status": status, "timeline": timeline }),
            )
            .await
    }
}

/// Generate a human-facing order number: `ORD-{year}-{4 digits}`.
///
/// The digits come from the current millisecond clock, so numbers are
/// unique enough for display; the record id is the real key.
fn generate_order_number() -> String {
    let year = Utc::now().year();
    let millis = Utc::now().timestamp_millis().unsigned_abs();
    format!("ORD-{year}-{:04}", millis % 10_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number_shape() {
        let number = generate_order_number();
        let mut parts = number.split('-');
        assert_eq!(parts.next(), Some("ORD"));
        let year: i32 = parts.next().expect("year").parse().expect("numeric year");
        assert!(year >= 2026);
        let digits = parts.next().expect("digits");
        assert_eq!(digits.len(), 4);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts.next(), None);
    }
}
