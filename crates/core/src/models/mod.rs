//! Typed records for every store collection.
//!
//! The record store itself is schemaless JSON; these types are the client's
//! declared shape per resource, with required vs. optional fields explicit.
//! Field names follow the wire format (camelCase).

pub mod address;
pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;

pub use address::Address;
pub use cart::CartItem;
pub use category::Category;
pub use order::{Order, OrderItem, TimelineEntry};
pub use product::Product;
pub use review::Review;
pub use user::User;
pub use wishlist::WishlistItem;
