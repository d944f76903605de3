//! Document keys and node constructors for the bool/filtered query DSL.
//!
//! Clauses are kept as `serde_json::Value` trees: leaf queries and simple
//! filters are opaque to this crate, so only the structural keys below are
//! ever inspected.

use serde_json::{json, Value};

pub const QUERY: &str = "query";
pub const FILTER: &str = "filter";
pub const FILTERED: &str = "filtered";
pub const BOOL: &str = "bool";
pub const MUST: &str = "must";
pub const SHOULD: &str = "should";

/// Returns the value under `key` if it exists and is not `null`.
///
/// `get` on a non-object value yields `None`, so this is safe to call on
/// any node.
pub fn present<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    node.get(key).filter(|v| !v.is_null())
}

/// Mutable counterpart of [`present`].
pub fn present_mut<'a>(node: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    node.get_mut(key).filter(|v| !v.is_null())
}

/// `{bool: {should: filters}}`: an OR-group of the given filters.
pub fn should_group(filters: Vec<Value>) -> Value {
    json!({ BOOL: { SHOULD: filters } })
}

/// `{bool: {must: clauses}}`: an AND-group of the given clauses.
pub fn must_group(clauses: Vec<Value>) -> Value {
    json!({ BOOL: { MUST: clauses } })
}

/// `{filtered: {query, filter}}`
pub fn filtered_query(query: Value, filter: Value) -> Value {
    json!({ FILTERED: { QUERY: query, FILTER: filter } })
}
