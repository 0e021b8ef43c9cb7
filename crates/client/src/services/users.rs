//! User profile service.

use rust_decimal::Decimal;

use voltbay_core::{Order, OrderStatus, RecordId, Resource, User, WishlistItem};

use crate::api::{Query, StoreClient};
use crate::error::ClientError;

/// Aggregates for the account overview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStats {
    pub total_orders: usize,
    pub delivered: usize,
    pub total_spent: Decimal,
    pub wishlist_items: usize,
}

/// User profile service.
#[derive(Clone)]
pub struct UserService {
    client: StoreClient,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Fetch a user by id. The password hash never appears in the
    /// response.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn by_id(&self, id: &RecordId) -> Result<User, ClientError> {
        self.client.fetch_by_id(Resource::Users, id.as_str()).await
    }

    /// Patch profile fields. Use
    /// [`AuthService::change_password`](crate::services::AuthService::change_password)
    /// for passwords; this method is for display fields.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn update_profile(
        &self,
        id: &RecordId,
        patch: &serde_json::Value,
    ) -> Result<User, ClientError> {
        self.client.update(Resource::Users, id.as_str(), patch).await
    }

    /// Replace the avatar (base64 image data, or empty to clear).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn update_avatar(&self, id: &RecordId, avatar: &str) -> Result<User, ClientError> {
        self.update_profile(id, &serde_json::json!({ "avatar": avatar }))
            .await
    }

    /// Account overview aggregates: order counts, lifetime spend,
    /// wishlist size.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn account_stats(&self, user_id: &RecordId) -> Result<AccountStats, ClientError> {
        let orders: Vec<Order> = self
            .client
            .fetch_collection(Resource::Orders, &Query::new().filter("userId", user_id))
            .await?;
        let wishlist: Vec<WishlistItem> = self
            .client
            .fetch_collection(Resource::Wishlist, &Query::new().filter("userId", user_id))
            .await?;

        Ok(AccountStats {
            total_orders: orders.len(),
            delivered: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Delivered)
                .count(),
            total_spent: orders.iter().map(|o| o.total).sum(),
            wishlist_items: wishlist.len(),
        })
    }
}
