//! Wishlist service.
//!
//! One entry per (user, product) pair, enforced by a pre-check before the
//! create. The check is not atomic; see the module note in
//! [`services`](crate::services).

use chrono::Utc;

use voltbay_core::{Product, RecordId, Resource, WishlistItem};

use crate::api::{Query, StoreClient};
use crate::error::ClientError;

/// Wishlist service.
#[derive(Clone)]
pub struct WishlistService {
    client: StoreClient,
}

impl WishlistService {
    /// Create a new wishlist service.
    #[must_use]
    pub const fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// All wishlist entries for a user, most recently added first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn items_for(&self, user_id: &RecordId) -> Result<Vec<WishlistItem>, ClientError> {
        self.client
            .fetch_collection(
                Resource::Wishlist,
                &Query::new().filter("userId", user_id).sort_desc("addedAt"),
            )
            .await
    }

    /// The user's entry for a product, if any.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn entry_for(
        &self,
        user_id: &RecordId,
        product_id: &RecordId,
    ) -> Result<Option<WishlistItem>, ClientError> {
        let matches: Vec<WishlistItem> = self
            .client
            .fetch_collection(
                Resource::Wishlist,
                &Query::new()
                    .filter("userId", user_id)
                    .filter("productId", product_id),
            )
            .await?;
        Ok(matches.into_iter().next())
    }

    /// Is this product on the user's wishlist?
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn is_in_wishlist(
        &self,
        user_id: &RecordId,
        product_id: &RecordId,
    ) -> Result<bool, ClientError> {
        Ok(self.entry_for(user_id, product_id).await?.is_some())
    }

    /// Add a product to the wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Conflict` if the product is already on the
    /// user's wishlist.
    pub async fn add(
        &self,
        user_id: &RecordId,
        product: &Product,
    ) -> Result<WishlistItem, ClientError> {
        if self.is_in_wishlist(user_id, &product.id).await? {
            return Err(ClientError::Conflict(
                "product is already on the wishlist".to_owned(),
            ));
        }

        let item = WishlistItem {
            id: RecordId::generate(),
            user_id: user_id.clone(),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            added_at: Utc::now(),
        };
        self.client.create(Resource::Wishlist, &item).await
    }

    /// Remove an entry by its id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the entry does not exist.
    pub async fn remove(&self, id: &RecordId) -> Result<(), ClientError> {
        self.client.remove(Resource::Wishlist, id.as_str()).await
    }

    /// Remove a user's entry for a product, if present.
    ///
    /// Returns whether an entry was removed.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn remove_by_product(
        &self,
        user_id: &RecordId,
        product_id: &RecordId,
    ) -> Result<bool, ClientError> {
        match self.entry_for(user_id, product_id).await? {
            Some(entry) => {
                self.remove(&entry.id).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Number of entries on the user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn count(&self, user_id: &RecordId) -> Result<usize, ClientError> {
        Ok(self.items_for(user_id).await?.len())
    }
}
