//! Cart service.
//!
//! Cart lines are keyed per user; adding a product that is already in the
//! cart increments that line's quantity instead of creating a duplicate
//! line.

use serde_json::{json, Map, Value};

use voltbay_core::{CartItem, Product, RecordId, Resource};

use crate::api::{Query, StoreClient};
use crate::error::ClientError;

/// Cart service.
#[derive(Clone)]
pub struct CartService {
    client: StoreClient,
}

impl CartService {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// All cart lines for a user, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn items_for(&self, user_id: &RecordId) -> Result<Vec<CartItem>, ClientError> {
        self.client
            .fetch_collection(Resource::Cart, &Query::new().filter("userId", user_id))
            .await
    }

    /// Add a product to a user's cart.
    ///
    /// If a line for this product already exists, its quantity is
    /// incremented by `quantity`; otherwise a new line is created with a
    /// denormalized copy of the product's display fields. A `quantity`
    /// of 0 is treated as 1.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn add(
        &self,
        user_id: &RecordId,
        product: &Product,
        quantity: u32,
        selected_options: Map<String, Value>,
    ) -> Result<CartItem, ClientError> {
        let quantity = quantity.max(1);

        let existing = self.items_for(user_id).await?;
        if let Some(line) = existing.iter().find(|item| item.product_id == product.id) {
            return self
                .update_quantity(&line.id, line.quantity.saturating_add(quantity))
                .await;
        }

        let item = CartItem {
            id: RecordId::generate(),
            user_id: user_id.clone(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
            selected_options,
        };
        self.client.create(Resource::Cart, &item).await
    }

    /// Set a line's quantity.
    ///
    /// Quantities below 1 are rejected client-side; there is no upper
    /// clamp against product stock at the cart level.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for a quantity below 1 and
    /// `ClientError::NotFound` if the line is gone.
    pub async fn update_quantity(
        &self,
        id: &RecordId,
        quantity: u32,
    ) -> Result<CartItem, ClientError> {
        if quantity < 1 {
            return Err(ClientError::Validation(
                "quantity must be at least 1".to_owned(),
            ));
        }
        self.client
            .update(Resource::Cart, id.as_str(), &json!({ "quantity": quantity }))
            .await
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the line does not exist; a
    /// remove is never silently a no-op.
    pub async fn remove(&self, id: &RecordId) -> Result<(), ClientError> {
        self.client.remove(Resource::Cart, id.as_str()).await
    }

    /// Remove every line for a user (after checkout).
    ///
    /// # Errors
    ///
    /// Returns the first failure encountered.
    pub async fn clear(&self, user_id: &RecordId) -> Result<(), ClientError> {
        for item in self.items_for(user_id).await? {
            self.remove(&item.id).await?;
        }
        Ok(())
    }
}
