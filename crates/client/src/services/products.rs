//! Product catalog service (read-only).

use voltbay_core::{Category, Product, RecordId, Resource, Review};

use crate::api::{Query, StoreClient};
use crate::error::ClientError;

/// Default number of related products to show.
const RELATED_LIMIT: usize = 4;

/// Catalog service.
#[derive(Clone)]
pub struct ProductService {
    client: StoreClient,
}

impl ProductService {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// The whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn all(&self) -> Result<Vec<Product>, ClientError> {
        self.client
            .fetch_collection(Resource::Products, &Query::new())
            .await
    }

    /// A single product by id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn by_id(&self, id: &RecordId) -> Result<Product, ClientError> {
        self.client.fetch_by_id(Resource::Products, id.as_str()).await
    }

    /// Other products in the same category, excluding the one being
    /// viewed.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn related(
        &self,
        category: &str,
        exclude_id: &RecordId,
        limit: Option<usize>,
    ) -> Result<Vec<Product>, ClientError> {
        self.client
            .fetch_collection(
                Resource::Products,
                &Query::new()
                    .filter("category", category)
                    .not_equal("id", exclude_id)
                    .limit(limit.unwrap_or(RELATED_LIMIT)),
            )
            .await
    }

    /// All categories.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        self.client
            .fetch_collection(Resource::Categories, &Query::new())
            .await
    }

    /// Reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn reviews_for(&self, product_id: &RecordId) -> Result<Vec<Review>, ClientError> {
        self.client
            .fetch_collection(
                Resource::Reviews,
                &Query::new().filter("productId", product_id),
            )
            .await
    }
}
