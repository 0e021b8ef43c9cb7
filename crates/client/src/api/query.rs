//! Query builder for collection reads.
//!
//! Produces the parameter dialect the store understands: exact-match
//! filters, `{field}_ne` exclusions, and the `_sort` / `_order` / `_limit`
//! directives.

use std::fmt::Write as _;

/// A collection query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// An unfiltered query (the whole collection).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact-match filter. Multiple filters are ANDed by the store.
    #[must_use]
    pub fn filter(mut self, field: &str, value: impl ToString) -> Self {
        self.params.push((field.to_owned(), value.to_string()));
        self
    }

    /// Exclude records where `field` equals `value`.
    #[must_use]
    pub fn not_equal(mut self, field: &str, value: impl ToString) -> Self {
        self.params.push((format!("{field}_ne"), value.to_string()));
        self
    }

    /// Sort ascending by a field.
    #[must_use]
    pub fn sort_asc(mut self, field: &str) -> Self {
        self.params.push(("_sort".to_owned(), field.to_owned()));
        self
    }

    /// Sort descending by a field.
    #[must_use]
    pub fn sort_desc(mut self, field: &str) -> Self {
        self.params.push(("_sort".to_owned(), field.to_owned()));
        self.params.push(("_order".to_owned(), "desc".to_owned()));
        self
    }

    /// Keep at most `n` records (applied after sorting).
    #[must_use]
    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("_limit".to_owned(), n.to_string()));
        self
    }

    /// The parameter pairs, for `reqwest::RequestBuilder::query`.
    #[must_use]
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.params
    }

    /// A canonical textual form, used as part of the cache key.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.params {
            let _ = write!(out, "{key}={value}&");
        }
        out
    }
}
