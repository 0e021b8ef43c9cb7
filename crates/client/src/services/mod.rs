//! Domain services built on the API client.
//!
//! Each service owns a clone of [`StoreClient`](crate::api::StoreClient)
//! and translates one resource's intents into store calls. Business rules
//! the store does not enforce (unique email, one wishlist entry per
//! product, one default address) live here as pre-check sequences; they
//! are correct for a single writer and can race across concurrent
//! clients.

pub mod addresses;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;
pub mod wishlist;

pub use addresses::AddressService;
pub use auth::AuthService;
pub use cart::CartService;
pub use orders::OrderService;
pub use products::ProductService;
pub use users::UserService;
pub use wishlist::WishlistService;
