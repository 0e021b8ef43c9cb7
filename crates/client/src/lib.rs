//! Voltbay client library.
//!
//! The application-side half of the record-store contract:
//!
//! - [`api`] - Typed HTTP client with a tag-keyed response cache and an
//!   explicit invalidation signal per resource
//! - [`services`] - Domain operations (auth, cart, wishlist, addresses,
//!   orders, users, products) built on the client
//! - [`session`] - The identity holder: login state, persisted opaque id,
//!   rehydration on startup
//! - [`views`] - Derived read-only aggregates over fetched collections
//!
//! # Consistency model
//!
//! Every mutation invalidates the cache for its resource and ticks that
//! resource's watch channel; subscribed readers refetch. This gives
//! read-after-write within one client process only - nothing here protects
//! against concurrent writers, and the pre-check sequences in
//! [`services`] (unique email, wishlist de-dup, single default address)
//! can race across processes.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod views;

pub use api::{Query, Stats, StoreClient};
pub use config::ClientConfig;
pub use error::ClientError;
pub use session::{FileIdentityStore, IdentityStore, MemoryIdentityStore, Session, SessionState};
pub use views::{CartView, WishlistView};
