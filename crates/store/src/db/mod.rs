//! The JSON document store.
//!
//! Collections live in memory as ordered sequences of `serde_json::Value`
//! documents and are flushed back to a single JSON file after every
//! mutation. There are no transactions and no server-side validation:
//! invariants like email uniqueness are the client's responsibility, and
//! read-then-write sequences from concurrent clients can race. The store
//! only guarantees that individual operations are atomic: mutations flush
//! while still holding the collection write lock, so snapshots reach the
//! file in mutation order and a stale snapshot can never land last.

pub mod query;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::RwLock;

use voltbay_core::Resource;

use query::ListQuery;

/// Errors that can occur inside the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the database file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The database file is not a JSON object of arrays.
    #[error("corrupt database file: {0}")]
    Corrupt(String),

    /// No record with the given id in the collection.
    #[error("{resource}/{id} not found")]
    NotFound { resource: String, id: String },

    /// The payload is not a JSON object.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// A file-backed collection of JSON documents, addressable by resource name.
///
/// Cheaply cloneable; all clones share the same in-memory state.
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<JsonStoreInner>,
}

struct JsonStoreInner {
    /// Flush target; `None` for purely in-memory stores (tests, seeds).
    path: Option<PathBuf>,
    collections: RwLock<BTreeMap<String, Vec<Value>>>,
}

impl JsonStore {
    /// Open a store backed by the given file, creating an empty database
    /// if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read or created, or
    /// `StoreError::Corrupt` if it is not a JSON object of arrays.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let collections = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            parse_collections(&raw)?
        } else {
            let empty = empty_collections();
            let pretty = serialize_collections(&empty);
            std::fs::write(path, pretty)?;
            empty
        };

        Ok(Self {
            inner: Arc::new(JsonStoreInner {
                path: Some(path.to_path_buf()),
                collections: RwLock::new(collections),
            }),
        })
    }

    /// Create an in-memory store with empty collections (never flushed).
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(JsonStoreInner {
                path: None,
                collections: RwLock::new(empty_collections()),
            }),
        }
    }

    /// List the records of a collection matching a query, in insertion
    /// order unless the query sorts. Zero matches is an empty vec, never
    /// an error.
    pub async fn list(&self, resource: Resource, query: &ListQuery) -> Vec<Value> {
        let collections = self.inner.collections.read().await;
        collections
            .get(resource.as_str())
            .map(|records| query.apply(records))
            .unwrap_or_default()
    }

    /// Get a single record by id.
    pub async fn get(&self, resource: Resource, id: &str) -> Option<Value> {
        let collections = self.inner.collections.read().await;
        collections
            .get(resource.as_str())
            .and_then(|records| records.iter().find(|r| id_matches(r, id)).cloned())
    }

    /// Append a record to a collection, verbatim.
    ///
    /// The store assigns no id; callers generate one before posting.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidPayload` if the payload is not a JSON
    /// object, or `StoreError::Io` if the flush fails.
    pub async fn insert(&self, resource: Resource, payload: Value) -> Result<Value, StoreError> {
        if !payload.is_object() {
            return Err(StoreError::InvalidPayload(
                "record must be a JSON object".to_owned(),
            ));
        }

        let mut collections = self.inner.collections.write().await;
        collections
            .entry(resource.as_str().to_owned())
            .or_default()
            .push(payload.clone());
        self.flush(&collections).await?;

        Ok(payload)
    }

    /// Shallow-merge a partial payload into an existing record and return
    /// the merged record. The record's `id` field is immutable.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is absent,
    /// `StoreError::InvalidPayload` if the patch is not a JSON object, or
    /// `StoreError::Io` if the flush fails.
    pub async fn update(
        &self,
        resource: Resource,
        id: &str,
        patch: Value,
    ) -> Result<Value, StoreError> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::InvalidPayload(
                "patch must be a JSON object".to_owned(),
            ));
        };

        let mut collections = self.inner.collections.write().await;
        let records = collections
            .get_mut(resource.as_str())
            .ok_or_else(|| not_found(resource, id))?;
        let record = records
            .iter_mut()
            .find(|r| id_matches(r, id))
            .ok_or_else(|| not_found(resource, id))?;

        merge_into(record, patch);
        let merged = record.clone();
        self.flush(&collections).await?;

        Ok(merged)
    }

    /// Delete a record by id, returning the removed record.
    ///
    /// Deletes are not idempotent: a repeat call fails with `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the id is absent, or
    /// `StoreError::Io` if the flush fails.
    pub async fn remove(&self, resource: Resource, id: &str) -> Result<Value, StoreError> {
        let mut collections = self.inner.collections.write().await;
        let records = collections
            .get_mut(resource.as_str())
            .ok_or_else(|| not_found(resource, id))?;
        let index = records
            .iter()
            .position(|r| id_matches(r, id))
            .ok_or_else(|| not_found(resource, id))?;

        let removed = records.remove(index);
        self.flush(&collections).await?;

        Ok(removed)
    }

    /// Number of records in a collection.
    pub async fn len(&self, resource: Resource) -> usize {
        let collections = self.inner.collections.read().await;
        collections
            .get(resource.as_str())
            .map_or(0, std::vec::Vec::len)
    }

    /// Serialize the collections and write them to the database file, if
    /// any. Callers hold the write lock, which orders the file writes.
    async fn flush(
        &self,
        collections: &BTreeMap<String, Vec<Value>>,
    ) -> Result<(), StoreError> {
        if let Some(path) = &self.inner.path {
            tokio::fs::write(path, serialize_collections(collections)).await?;
        }
        Ok(())
    }
}

fn not_found(resource: Resource, id: &str) -> StoreError {
    StoreError::NotFound {
        resource: resource.as_str().to_owned(),
        id: id.to_owned(),
    }
}

/// Shallow field merge, preserving the record's id.
fn merge_into(record: &mut Value, patch: Map<String, Value>) {
    let Some(fields) = record.as_object_mut() else {
        return;
    };
    for (key, value) in patch {
        if key == "id" {
            continue;
        }
        fields.insert(key, value);
    }
}

/// Does this record's `id` field match the given path segment?
///
/// Ids are normally strings, but hand-edited databases may carry numeric
/// ids; those match their decimal representation.
fn id_matches(record: &Value, id: &str) -> bool {
    match record.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

fn empty_collections() -> BTreeMap<String, Vec<Value>> {
    Resource::ALL
        .into_iter()
        .map(|r| (r.as_str().to_owned(), Vec::new()))
        .collect()
}

fn parse_collections(raw: &str) -> Result<BTreeMap<String, Vec<Value>>, StoreError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    let Value::Object(root) = value else {
        return Err(StoreError::Corrupt(
            "top level must be a JSON object".to_owned(),
        ));
    };

    let mut collections = empty_collections();
    for (name, value) in root {
        match value {
            Value::Array(records) => {
                collections.insert(name, records);
            }
            _ => {
                return Err(StoreError::Corrupt(format!(
                    "collection {name} must be an array"
                )));
            }
        }
    }
    Ok(collections)
}

fn serialize_collections(collections: &BTreeMap<String, Vec<Value>>) -> String {
    let root: Map<String, Value> = collections
        .iter()
        .map(|(name, records)| (name.clone(), Value::Array(records.clone())))
        .collect();
    serde_json::to_string_pretty(&Value::Object(root)).unwrap_or_else(|_| "{}".to_owned())
}
