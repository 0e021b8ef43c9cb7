//! Collection query evaluation.
//!
//! Implements the query-parameter dialect the client speaks: exact-match
//! AND filters on every plain key/value pair, `{field}_ne` exclusions, and
//! the `_sort` / `_order` / `_limit` directives. Filtering happens before
//! sorting, sorting before limiting.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde_json::Value;

/// Sort direction for `_order`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A parsed collection query.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    filters: Vec<(String, String)>,
    ne_filters: Vec<(String, String)>,
    sort: Option<String>,
    order: SortOrder,
    limit: Option<usize>,
}

impl ListQuery {
    /// Parse raw query parameters.
    ///
    /// Unparseable `_limit` values are ignored rather than rejected, and
    /// any `_order` other than `desc` means ascending.
    #[must_use]
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut query = Self::default();
        for (key, value) in params {
            match key.as_str() {
                "_sort" => query.sort = Some(value.clone()),
                "_order" => {
                    if value.eq_ignore_ascii_case("desc") {
                        query.order = SortOrder::Desc;
                    }
                }
                "_limit" => query.limit = value.parse().ok(),
                _ => {
                    if let Some(field) = key.strip_suffix("_ne") {
                        query.ne_filters.push((field.to_owned(), value.clone()));
                    } else {
                        query.filters.push((key.clone(), value.clone()));
                    }
                }
            }
        }
        query
    }

    /// Evaluate the query against a collection.
    #[must_use]
    pub fn apply(&self, records: &[Value]) -> Vec<Value> {
        let mut matched: Vec<Value> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        if let Some(sort_key) = &self.sort {
            matched.sort_by(|a, b| compare_values(a.get(sort_key), b.get(sort_key)));
            if self.order == SortOrder::Desc {
                matched.reverse();
            }
        }

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }

        matched
    }

    fn matches(&self, record: &Value) -> bool {
        self.filters
            .iter()
            .all(|(field, raw)| value_matches(record.get(field), raw))
            && self
                .ne_filters
                .iter()
                .all(|(field, raw)| !value_matches(record.get(field), raw))
    }
}

/// Loose equality between a document field and a raw query-string value.
fn value_matches(field: Option<&Value>, raw: &str) -> bool {
    match field {
        Some(Value::String(s)) => s == raw,
        Some(Value::Number(n)) => raw
            .parse::<f64>()
            .is_ok_and(|parsed| n.as_f64().is_some_and(|v| (v - parsed).abs() < f64::EPSILON)),
        Some(Value::Bool(b)) => raw.parse::<bool>() == Ok(*b),
        Some(other) => other.to_string() == raw,
        None => false,
    }
}

/// Ordering between two document fields for `_sort`.
///
/// Numbers compare numerically, strings lexicographically (RFC 3339
/// timestamps therefore sort chronologically); mixed or missing values
/// fall back to their JSON text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (x, y) => {
            let x = x.map(ToString::to_string).unwrap_or_default();
            let y = y.map(ToString::to_string).unwrap_or_default();
            x.cmp(&y)
        }
    }
}
