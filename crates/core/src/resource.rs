//! Collection names served by the record store.
//!
//! `Resource` is both the URL path segment and the cache-invalidation tag:
//! a mutation on a resource invalidates every cached read for that resource.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A named collection in the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Users,
    Products,
    Orders,
    Cart,
    Wishlist,
    Addresses,
    Reviews,
    Categories,
}

impl Resource {
    /// All collections, in the order they appear in the database file.
    pub const ALL: [Self; 8] = [
        Self::Users,
        Self::Products,
        Self::Orders,
        Self::Cart,
        Self::Wishlist,
        Self::Addresses,
        Self::Reviews,
        Self::Categories,
    ];

    /// The collection name as it appears in URLs and the database file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
            Self::Addresses => "addresses",
            Self::Reviews => "reviews",
            Self::Categories => "categories",
        }
    }

    /// Parse a URL path segment into a resource.
    #[must_use]
    pub fn from_path(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == segment)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_roundtrip() {
        for resource in Resource::ALL {
            assert_eq!(Resource::from_path(resource.as_str()), Some(resource));
        }
    }

    #[test]
    fn test_from_path_unknown() {
        assert_eq!(Resource::from_path("login"), None);
        assert_eq!(Resource::from_path(""), None);
    }
}
