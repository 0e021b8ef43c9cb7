//! Integration test harness for Voltbay.
//!
//! Spawns the record-store server in-process on an ephemeral port, backed
//! by an in-memory [`JsonStore`], and hands tests a [`StoreClient`] pointed
//! at it. Each test gets its own server; nothing is shared between tests
//! and nothing touches the filesystem.
//!
//! ```rust,ignore
//! let ctx = TestStore::spawn().await;
//! let client = ctx.client();
//! let product = ctx.seed_product("p1", "Turntable", 10.0).await;
//! ```

use serde_json::json;

use voltbay_client::{ClientConfig, StoreClient};
use voltbay_core::{Product, Resource};
use voltbay_store::db::JsonStore;
use voltbay_store::{AppState, StoreConfig};

/// An in-process store server plus direct access to its backing store.
pub struct TestStore {
    pub base_url: String,
    pub store: JsonStore,
}

impl TestStore {
    /// Start a fresh server on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind; tests have no way to recover.
    pub async fn spawn() -> Self {
        let store = JsonStore::in_memory();
        let state = AppState::new(StoreConfig::default(), store.clone());
        let app = voltbay_store::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self {
            base_url: format!("http://{addr}"),
            store,
        }
    }

    /// A client pointed at this server.
    #[must_use]
    pub fn client(&self) -> StoreClient {
        StoreClient::new(&ClientConfig {
            base_url: self.base_url.clone(),
        })
    }

    /// Insert a minimal product directly into the backing store.
    ///
    /// # Panics
    ///
    /// Panics if the insert fails or the record does not deserialize.
    pub async fn seed_product(&self, id: &str, name: &str, price: f64) -> Product {
        let record = self
            .store
            .insert(
                Resource::Products,
                json!({
                    "id": id,
                    "name": name,
                    "price": price,
                    "category": "audio",
                    "stock": 10,
                }),
            )
            .await
            .expect("insert product");
        serde_json::from_value(record).expect("valid product")
    }
}
