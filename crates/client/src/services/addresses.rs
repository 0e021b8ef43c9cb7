//! Address service.
//!
//! At most one default address per user. Reassignment is an
//! unset-then-set sequence, not a transaction: a crash between the two
//! steps leaves no default, and two concurrent clients can each produce
//! one. Accepted and documented; the store offers nothing stronger.

use serde_json::json;

use voltbay_core::{Address, RecordId, Resource};

use crate::api::{Query, StoreClient};
use crate::error::ClientError;

/// Address service.
#[derive(Clone)]
pub struct AddressService {
    client: StoreClient,
}

impl AddressService {
    /// Create a new address service.
    #[must_use]
    pub const fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// All addresses for a user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn for_user(&self, user_id: &RecordId) -> Result<Vec<Address>, ClientError> {
        self.client
            .fetch_collection(Resource::Addresses, &Query::new().filter("userId", user_id))
            .await
    }

    /// A single address by id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn by_id(&self, id: &RecordId) -> Result<Address, ClientError> {
        self.client.fetch_by_id(Resource::Addresses, id.as_str()).await
    }

    /// Save a new address. The id must already be generated
    /// (`RecordId::generate()`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn create(&self, address: &Address) -> Result<Address, ClientError> {
        self.client.create(Resource::Addresses, address).await
    }

    /// Patch fields of an existing address.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn update(
        &self,
        id: &RecordId,
        patch: &serde_json::Value,
    ) -> Result<Address, ClientError> {
        self.client.update(Resource::Addresses, id.as_str(), patch).await
    }

    /// Delete an address.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn delete(&self, id: &RecordId) -> Result<(), ClientError> {
        self.client.remove(Resource::Addresses, id.as_str()).await
    }

    /// Make `id` the user's default address.
    ///
    /// First clears `isDefault` on every address that currently has it,
    /// then sets it on the target, so exactly one address ends up default
    /// (single-writer assumption).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the target id is absent.
    pub async fn set_default(
        &self,
        id: &RecordId,
        user_id: &RecordId,
    ) -> Result<Address, ClientError> {
        let current = self.for_user(user_id).await?;
        for address in current.iter().filter(|a| a.is_default && a.id != *id) {
            let _: Address = self
                .update(&address.id, &json!({ "isDefault": false }))
                .await?;
        }
        self.update(id, &json!({ "isDefault": true })).await
    }
}
