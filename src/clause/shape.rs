//! Shape classification for query clauses and the filters they carry.

use serde_json::{Map, Value};

use super::strategy::Strategy;
use super::types::*;

/// Pick the strategy matching the clause's shape.
///
/// Total over clauses that passed [`validate_clause`](super::validate_clause):
/// a filtered query wins over a plain query, and anything without a `query`
/// is treated as a plain filter.
pub fn classify(clause: &Map<String, Value>) -> Strategy {
    match clause.get(QUERY).filter(|q| !q.is_null()) {
        Some(query) if present(query, FILTERED).is_some() => Strategy::FilteredQuery,
        Some(_) => Strategy::Query,
        None => Strategy::Filter,
    }
}

/// The bool-merge case a target filter falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterShape {
    /// `bool.must` is an array.
    MustList,
    /// `bool.must` is a single filter.
    MustSingle,
    /// `bool.should` without `bool.must`.
    Should,
    /// A `bool` key with neither `must` nor `should`.
    UnknownBool,
    /// No `bool` key at all.
    Simple,
}

/// Classify a filter for merging. `must` is checked before `should`, so a
/// filter carrying both is treated as a must-filter and its `should` is left
/// alone.
pub fn classify_filter(filter: &Value) -> FilterShape {
    let Some(bool_node) = filter.get(BOOL) else {
        return FilterShape::Simple;
    };

    if let Some(must) = present(bool_node, MUST) {
        if must.is_array() {
            FilterShape::MustList
        } else {
            FilterShape::MustSingle
        }
    } else if present(bool_node, SHOULD).is_some() {
        FilterShape::Should
    } else {
        FilterShape::UnknownBool
    }
}
