//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StoreConfig;
use crate::db::JsonStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the document
/// store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StoreConfig,
    store: JsonStore,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StoreConfig, store: JsonStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &JsonStore {
        &self.inner.store
    }
}
