//! Typed API client for the record store.
//!
//! One method per resource x verb, a `moka` response cache keyed by
//! resource tag, and an explicit per-resource invalidation signal. Reads
//! go through the cache; every mutation returns the canonical record from
//! the store, bumps the resource's generation (orphaning its cached
//! reads), and ticks a `watch` channel that subscribed readers use to
//! refetch.

mod cache;
mod query;

pub use query::Query;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;

use voltbay_core::{Resource, User};

use crate::config::ClientConfig;
use crate::error::ClientError;

use cache::CacheKey;

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Store-wide counters from `GET /stats`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Stats {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub revenue: f64,
}

/// Client for the record store.
///
/// Cheaply cloneable; clones share the cache and the invalidation
/// channels.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    http: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, Arc<Value>>,
    /// One generation channel per resource, created up front.
    tags: HashMap<Resource, watch::Sender<u64>>,
}

impl StoreClient {
    /// Create a new client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        let tags = Resource::ALL
            .into_iter()
            .map(|resource| (resource, watch::Sender::new(0)))
            .collect();

        Self {
            inner: Arc::new(StoreClientInner {
                http: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                cache,
                tags,
            }),
        }
    }

    /// Fetch the records matching a query, in store order unless the
    /// query sorts. Zero matches is `Ok(vec![])`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure or
    /// `ClientError::Decode` if the body does not match `T`.
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: &Query,
    ) -> Result<Vec<T>, ClientError> {
        let key = CacheKey::collection(resource, self.generation(resource), query.cache_key());
        if let Some(cached) = self.inner.cache.get(&key).await {
            return Ok(serde_json::from_value((*cached).clone())?);
        }

        let response = self
            .inner
            .http
            .get(self.url(resource.as_str()))
            .query(query.as_pairs())
            .send()
            .await?;
        let body: Value = check(response).await?.json().await?;

        self.inner.cache.insert(key, Arc::new(body.clone())).await;
        Ok(serde_json::from_value(body)?)
    }

    /// Fetch a single record by id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn fetch_by_id<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: &str,
    ) -> Result<T, ClientError> {
        let key = CacheKey::by_id(resource, self.generation(resource), id);
        if let Some(cached) = self.inner.cache.get(&key).await {
            return Ok(serde_json::from_value((*cached).clone())?);
        }

        let response = self
            .inner
            .http
            .get(self.url(&format!("{resource}/{id}")))
            .send()
            .await?;
        let body: Value = check(response).await?.json().await?;

        self.inner.cache.insert(key, Arc::new(body.clone())).await;
        Ok(serde_json::from_value(body)?)
    }

    /// Create a record. The caller supplies the id (the store assigns
    /// none); generate one with `RecordId::generate()`.
    ///
    /// Invalidates the resource tag on success.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn create<T: Serialize + DeserializeOwned>(
        &self,
        resource: Resource,
        payload: &T,
    ) -> Result<T, ClientError> {
        let response = self
            .inner
            .http
            .post(self.url(resource.as_str()))
            .json(payload)
            .send()
            .await?;
        let created: T = check(response).await?.json().await?;

        self.invalidate(resource);
        Ok(created)
    }

    /// Shallow-merge a partial payload into a record; returns the merged
    /// record. Invalidates the resource tag on success.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn update<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: &str,
        patch: &impl Serialize,
    ) -> Result<T, ClientError> {
        let response = self
            .inner
            .http
            .patch(self.url(&format!("{resource}/{id}")))
            .json(patch)
            .send()
            .await?;
        let merged: T = check(response).await?.json().await?;

        self.invalidate(resource);
        Ok(merged)
    }

    /// Delete a record. Repeat deletes fail with `NotFound`; a delete is
    /// never silently a no-op. Invalidates the resource tag on success.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the id is absent.
    pub async fn remove(&self, resource: Resource, id: &str) -> Result<(), ClientError> {
        let response = self
            .inner
            .http
            .delete(self.url(&format!("{resource}/{id}")))
            .send()
            .await?;
        check(response).await?;

        self.invalidate(resource);
        Ok(())
    }

    /// `POST /login`: credential check against the store.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` with the store's message if the
    /// credentials are rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let response = self
            .inner
            .http
            .post(self.url("login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// `GET /stats`: store-wide counters.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` on transport failure.
    pub async fn stats(&self) -> Result<Stats, ClientError> {
        let response = self.inner.http.get(self.url("stats")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Subscribe to a resource's invalidation signal.
    ///
    /// The channel carries the resource generation; it ticks after every
    /// mutation issued through this client. Await
    /// `watch::Receiver::changed` and refetch.
    #[must_use]
    pub fn subscribe(&self, resource: Resource) -> watch::Receiver<u64> {
        self.tag(resource).subscribe()
    }

    /// Invalidate every cached read for a resource.
    ///
    /// Called automatically by mutations; public so callers can force a
    /// refetch after out-of-band writes.
    pub fn invalidate(&self, resource: Resource) {
        self.tag(resource).send_modify(|generation| *generation += 1);
        tracing::debug!(%resource, "cache tag invalidated");
    }

    fn generation(&self, resource: Resource) -> u64 {
        *self.tag(resource).borrow()
    }

    /// # Panics
    ///
    /// Never: the tag map is populated for every `Resource` variant at
    /// construction.
    fn tag(&self, resource: Resource) -> &watch::Sender<u64> {
        self.inner
            .tags
            .get(&resource)
            .expect("every resource has a tag channel")
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }
}

/// Map a response status to the error taxonomy, passing 2xx through.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => {
            let path = response.url().path().to_owned();
            Err(ClientError::NotFound(path))
        }
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized(error_message(response).await)),
        _ => Err(ClientError::UnexpectedStatus(status)),
    }
}

/// Extract the `{"error": ...}` message from an error body, if any.
async fn error_message(response: Response) -> String {
    let status = response.status();
    response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(ToOwned::to_owned))
        .unwrap_or_else(|| status.to_string())
}
