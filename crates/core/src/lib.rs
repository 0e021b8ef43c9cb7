//! Voltbay Core - Shared types library.
//!
//! This crate provides common types used across all Voltbay components:
//! - `store` - Record-store HTTP server
//! - `client` - Typed API client, session holder, and view models
//! - `cli` - Command-line tools for seeding and stats
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, and statuses
//! - [`models`] - Typed records for every store collection
//! - [`resource`] - Collection names, doubling as cache-invalidation tags

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod resource;
pub mod types;

pub use models::*;
pub use resource::Resource;
pub use types::*;
