//! Error types for clause construction and filter merging.

use thiserror::Error;

/// Errors raised while building or extending a query clause.
///
/// Every variant is detected before the owned clause is written, so a
/// failed call leaves the builder exactly as it was.
#[derive(Debug, Error)]
pub enum FilterError {
    /// No clause was supplied (JSON `null`).
    #[error("a query clause is required")]
    MissingClause,

    /// The clause breaks the query/filter exclusivity or filtered-query rules.
    #[error("invalid query clause: {0}")]
    InvalidClause(ClauseViolation),

    /// `append` was called without any filters.
    #[error("at least one filter is required")]
    EmptyFilters,

    /// The target filter has a `bool` key with neither `must` nor `should`.
    #[error("cannot extend bool filter without `must` or `should` (found keys: {keys:?})")]
    InvalidFilterShape {
        /// Keys found under `bool`
        keys: Vec<String>,
    },

    /// Input text was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which structural rule a rejected clause violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClauseViolation {
    #[error("expected a JSON object")]
    NotAnObject,

    #[error("one of `filter` or `query` is required")]
    MissingQueryOrFilter,

    #[error("`filter` and `query` are mutually exclusive, use a filtered query to combine the two")]
    QueryAndFilter,

    #[error("filtered queries require a filter and a query")]
    IncompleteFilteredQuery,
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_clause_message_includes_violation() {
        let err = FilterError::InvalidClause(ClauseViolation::QueryAndFilter);
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn test_invalid_filter_shape_lists_keys() {
        let err = FilterError::InvalidFilterShape {
            keys: vec!["must_not".to_string()],
        };
        assert!(err.to_string().contains("must_not"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FilterError = parse.into();
        assert!(matches!(err, FilterError::Json(_)));
    }
}
