//! Mutation strategies, one per clause shape.
//!
//! Each strategy grafts an OR-group of new filters onto the clause so that
//! the group becomes one more mandatory condition. The filtered-query and
//! plain-filter strategies share the bool-merge in [`merge_filter`]; they
//! differ only in where the target filter lives.

use std::fmt;

use serde_json::{Map, Value};
use tracing::trace;

use super::shape::{classify_filter, FilterShape};
use super::types::*;
use crate::error::{ClauseViolation, FilterError, Result};

/// The three shape-specific ways of appending filters to a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `{query: {filtered: {query, filter}}}`: merge into the inner filter.
    FilteredQuery,
    /// `{query: Q}`: wrap `Q` in a filtered query.
    Query,
    /// `{filter: F}`: merge into `F`.
    Filter,
}

impl Strategy {
    /// Stable identifier, used in logs and by the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FilteredQuery => "filtered_query",
            Strategy::Query => "query",
            Strategy::Filter => "filter",
        }
    }

    /// Apply this strategy to `clause`, appending `filters` as one OR-group.
    ///
    /// `filters` must be non-empty; the builder checks this before dispatch.
    /// Fails without touching `clause` if the target slot is missing or the
    /// target filter cannot be extended.
    pub fn apply(self, clause: &mut Map<String, Value>, filters: Vec<Value>) -> Result<()> {
        match self {
            Strategy::Query => {
                let query = clause
                    .get_mut(QUERY)
                    .filter(|q| !q.is_null())
                    .ok_or(FilterError::InvalidClause(ClauseViolation::MissingQueryOrFilter))?;
                let inner = query.take();
                *query = filtered_query(inner, should_group(filters));
                Ok(())
            }
            Strategy::FilteredQuery => {
                let slot = clause
                    .get_mut(QUERY)
                    .and_then(|q| present_mut(q, FILTERED))
                    .and_then(|f| present_mut(f, FILTER))
                    .ok_or(FilterError::InvalidClause(
                        ClauseViolation::IncompleteFilteredQuery,
                    ))?;
                merge_filter(slot, filters)
            }
            Strategy::Filter => {
                let slot = clause
                    .get_mut(FILTER)
                    .filter(|f| !f.is_null())
                    .ok_or(FilterError::InvalidClause(ClauseViolation::MissingQueryOrFilter))?;
                merge_filter(slot, filters)
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Merge `filters` into the filter held in `slot`.
///
/// `slot` is the container's `filter` entry, so simple and should-only
/// filters can be replaced wholesale by a new must-group.
pub fn merge_filter(slot: &mut Value, filters: Vec<Value>) -> Result<()> {
    let shape = classify_filter(slot);
    trace!(?shape, count = filters.len(), "merging filters");

    match shape {
        FilterShape::MustList => {
            if let Some(Value::Array(must)) = must_slot(slot) {
                must.push(should_group(filters));
            }
            Ok(())
        }
        FilterShape::MustSingle => {
            if let Some(must) = must_slot(slot) {
                let original = must.take();
                *must = Value::Array(vec![original, should_group(filters)]);
            }
            Ok(())
        }
        // A bare should-filter is demoted into the must-group so its clauses
        // stay optional relative to each other.
        FilterShape::Should | FilterShape::Simple => {
            let prior = slot.take();
            *slot = must_group(vec![prior, should_group(filters)]);
            Ok(())
        }
        FilterShape::UnknownBool => Err(FilterError::InvalidFilterShape {
            keys: slot
                .get(BOOL)
                .and_then(Value::as_object)
                .map(|b| b.keys().cloned().collect())
                .unwrap_or_default(),
        }),
    }
}

fn must_slot(filter: &mut Value) -> Option<&mut Value> {
    filter.get_mut(BOOL)?.get_mut(MUST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clause(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn new_filters() -> Vec<Value> {
        vec![json!({"term": {"b": 2}}), json!({"term": {"c": 3}})]
    }

    #[test]
    fn test_query_becomes_filtered_query() {
        let mut c = clause(json!({"query": {"term": {"a": 1}}}));
        Strategy::Query.apply(&mut c, vec![json!({"term": {"b": 2}})]).unwrap();
        assert_eq!(
            Value::Object(c),
            json!({"query": {"filtered": {
                "query": {"term": {"a": 1}},
                "filter": {"bool": {"should": [{"term": {"b": 2}}]}}
            }}})
        );
    }

    #[test]
    fn test_must_list_gains_one_element() {
        let mut filter = json!({"bool": {
            "must": [{"term": {"a": 1}}],
            "minimum_should_match": 1
        }});
        merge_filter(&mut filter, new_filters()).unwrap();
        assert_eq!(
            filter,
            json!({"bool": {
                "must": [
                    {"term": {"a": 1}},
                    {"bool": {"should": [{"term": {"b": 2}}, {"term": {"c": 3}}]}}
                ],
                "minimum_should_match": 1
            }})
        );
    }

    #[test]
    fn test_must_single_becomes_list() {
        let mut filter = json!({"bool": {"must": {"term": {"a": 1}}}});
        merge_filter(&mut filter, new_filters()).unwrap();
        assert_eq!(
            filter,
            json!({"bool": {"must": [
                {"term": {"a": 1}},
                {"bool": {"should": [{"term": {"b": 2}}, {"term": {"c": 3}}]}}
            ]}})
        );
    }

    #[test]
    fn test_should_is_demoted_into_must() {
        let before = json!({"bool": {"should": [{"term": {"a": 1}}, {"term": {"a": 2}}]}});
        let mut filter = before.clone();
        merge_filter(&mut filter, new_filters()).unwrap();
        assert_eq!(
            filter,
            json!({"bool": {"must": [
                before,
                {"bool": {"should": [{"term": {"b": 2}}, {"term": {"c": 3}}]}}
            ]}})
        );
    }

    #[test]
    fn test_simple_filter_is_wrapped() {
        let mut filter = json!({"term": {"a": 1}});
        merge_filter(&mut filter, vec![json!({"term": {"b": 2}})]).unwrap();
        assert_eq!(
            filter,
            json!({"bool": {"must": [
                {"term": {"a": 1}},
                {"bool": {"should": [{"term": {"b": 2}}]}}
            ]}})
        );
    }

    #[test]
    fn test_must_and_should_keeps_should_untouched() {
        let mut filter = json!({"bool": {
            "must": {"term": {"a": 1}},
            "should": [{"term": {"z": 9}}]
        }});
        merge_filter(&mut filter, vec![json!({"term": {"b": 2}})]).unwrap();
        assert_eq!(filter["bool"]["should"], json!([{"term": {"z": 9}}]));
        assert_eq!(filter["bool"]["must"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_unknown_bool_fails_without_mutation() {
        let before = json!({"bool": {"fredoSanta": "Chi-Raq"}});
        let mut filter = before.clone();
        let err = merge_filter(&mut filter, new_filters()).unwrap_err();
        match err {
            FilterError::InvalidFilterShape { keys } => assert_eq!(keys, vec!["fredoSanta"]),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(filter, before);
    }

    #[test]
    fn test_filtered_query_merges_inner_filter() {
        let mut c = clause(json!({"query": {"filtered": {
            "query": {"match_all": {}},
            "filter": {"term": {"a": 1}}
        }}}));
        Strategy::FilteredQuery
            .apply(&mut c, vec![json!({"term": {"b": 2}})])
            .unwrap();
        assert_eq!(
            c["query"]["filtered"]["filter"],
            json!({"bool": {"must": [
                {"term": {"a": 1}},
                {"bool": {"should": [{"term": {"b": 2}}]}}
            ]}})
        );
        assert_eq!(c["query"]["filtered"]["query"], json!({"match_all": {}}));
    }

    #[test]
    fn test_strategy_on_mismatched_clause_fails() {
        let mut c = clause(json!({"filter": {"term": {"a": 1}}}));
        let before = c.clone();
        let err = Strategy::FilteredQuery.apply(&mut c, new_filters()).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidClause(ClauseViolation::IncompleteFilteredQuery)
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::FilteredQuery.to_string(), "filtered_query");
        assert_eq!(Strategy::Query.name(), "query");
        assert_eq!(Strategy::Filter.name(), "filter");
    }
}
