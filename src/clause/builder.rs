//! The fluent builder that owns a clause and appends filters to it.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::shape::classify;
use super::strategy::Strategy;
use super::types::*;
use crate::error::{ClauseViolation, FilterError, Result};

/// Owns one validated query clause and grafts filters onto it.
///
/// ```
/// use esfilter::clause::FilterBuilder;
/// use serde_json::json;
///
/// let mut builder = FilterBuilder::new(&json!({"query": {"term": {"a": 1}}})).unwrap();
/// builder.append([json!({"term": {"b": 2}})]).unwrap();
///
/// assert_eq!(
///     builder.to_value(),
///     json!({"query": {"filtered": {
///         "query": {"term": {"a": 1}},
///         "filter": {"bool": {"should": [{"term": {"b": 2}}]}}
///     }}})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterBuilder {
    clause: Map<String, Value>,
}

impl FilterBuilder {
    /// Validate `clause` and take a copy of it.
    pub fn new(clause: &Value) -> Result<Self> {
        let clause = validated(clause)?.clone();
        Ok(Self { clause })
    }

    /// Parse a clause from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::try_from(value)
    }

    /// Append filters to the clause as one OR-group.
    ///
    /// A single array argument is spread into its elements, so
    /// `append([json!([a, b])])` and `append([a, b])` are equivalent.
    pub fn append<I>(&mut self, filters: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let filters = normalize_filters(filters);
        if filters.is_empty() {
            return Err(FilterError::EmptyFilters);
        }

        let strategy = self.strategy();
        debug!(%strategy, count = filters.len(), "appending filters");
        strategy.apply(&mut self.clause, filters)?;
        Ok(self)
    }

    /// Append a single value: an object is one filter, an array is many.
    pub fn append_value(&mut self, filters: Value) -> Result<&mut Self> {
        self.append([filters])
    }

    /// The strategy the next `append` will use.
    pub fn strategy(&self) -> Strategy {
        classify(&self.clause)
    }

    /// Read view of the current clause.
    pub fn clause(&self) -> &Map<String, Value> {
        &self.clause
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.clause.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.clause)
    }
}

impl TryFrom<Value> for FilterBuilder {
    type Error = FilterError;

    /// Validate and take ownership of `clause` without copying.
    fn try_from(clause: Value) -> Result<Self> {
        validated(&clause)?;
        match clause {
            Value::Object(clause) => Ok(Self { clause }),
            _ => Err(FilterError::InvalidClause(ClauseViolation::NotAnObject)),
        }
    }
}

/// Check the structural rules a clause must satisfy before filters can be
/// appended to it.
pub fn validate_clause(clause: &Value) -> Result<()> {
    validated(clause).map(|_| ())
}

fn validated(clause: &Value) -> Result<&Map<String, Value>> {
    let map = match clause {
        Value::Null => return Err(FilterError::MissingClause),
        Value::Object(map) => map,
        _ => return Err(FilterError::InvalidClause(ClauseViolation::NotAnObject)),
    };

    let query = map.get(QUERY).filter(|q| !q.is_null());
    let has_filter = map.get(FILTER).is_some_and(|f| !f.is_null());

    match (query, has_filter) {
        (None, false) => Err(FilterError::InvalidClause(
            ClauseViolation::MissingQueryOrFilter,
        )),
        (Some(_), true) => Err(FilterError::InvalidClause(ClauseViolation::QueryAndFilter)),
        (Some(query), false) => match present(query, FILTERED) {
            Some(filtered)
                if present(filtered, QUERY).is_none() || present(filtered, FILTER).is_none() =>
            {
                Err(FilterError::InvalidClause(
                    ClauseViolation::IncompleteFilteredQuery,
                ))
            }
            _ => Ok(map),
        },
        (None, true) => Ok(map),
    }
}

/// Flatten call arguments into the list of filters to append.
///
/// One array argument counts as the whole list; anything else is taken
/// element by element. `null` arguments are dropped.
pub fn normalize_filters<I>(args: I) -> Vec<Value>
where
    I: IntoIterator<Item = Value>,
{
    let mut args: Vec<Value> = args.into_iter().filter(|v| !v.is_null()).collect();
    if args.len() == 1 && args[0].is_array() {
        if let Some(Value::Array(filters)) = args.pop() {
            return filters;
        }
    }
    args
}
