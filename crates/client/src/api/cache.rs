//! Cache types for record-store responses.
//!
//! Keys carry the resource's generation counter: a mutation bumps the
//! generation, so every key cached under the old generation becomes
//! unreachable and ages out via TTL. That makes "invalidate all reads
//! tagged with this resource" an O(1) counter bump.

use voltbay_core::Resource;

/// Cache key for a read against one resource.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey {
    pub resource: Resource,
    /// Resource generation at fetch time.
    pub generation: u64,
    /// Canonical query string, or `/{id}` for by-id reads.
    pub query: String,
}

impl CacheKey {
    pub fn collection(resource: Resource, generation: u64, query: String) -> Self {
        Self {
            resource,
            generation,
            query,
        }
    }

    pub fn by_id(resource: Resource, generation: u64, id: &str) -> Self {
        Self {
            resource,
            generation,
            query: format!("/{id}"),
        }
    }
}
