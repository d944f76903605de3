//! Optional Python bindings for esfilter via PyO3.
//!
//! Clauses and filters cross the boundary as JSON text, so callers can pass
//! `json.dumps(...)` output straight through. Enabled with the `python`
//! feature flag.
//!
//! ## Usage from Python
//!
//! ```python
//! import json
//! import esfilter
//!
//! clause = json.dumps({"query": {"term": {"a": 1}}})
//! merged = esfilter.append_filters(clause, [json.dumps({"term": {"b": 2}})])
//! print(json.loads(merged))
//!
//! esfilter.classify(clause)  # "query"
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::clause::FilterBuilder;
use crate::error::FilterError;

fn to_py_err(err: FilterError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Append filter groups to a clause and return the merged clause.
///
/// Args:
///     clause: JSON text of the query clause.
///     filters: JSON texts, one per `append` call. Each may be an object
///         or an array of objects.
///
/// Returns:
///     The merged clause as compact JSON text.
///
/// Raises:
///     ValueError: If any input is malformed or cannot be merged.
#[pyfunction]
fn append_filters(clause: &str, filters: Vec<String>) -> PyResult<String> {
    let mut builder = FilterBuilder::from_json(clause).map_err(to_py_err)?;
    for raw in &filters {
        let value = serde_json::from_str(raw)
            .map_err(|e| PyValueError::new_err(format!("invalid filter JSON: {}", e)))?;
        builder.append_value(value).map_err(to_py_err)?;
    }
    serde_json::to_string(&builder).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Name the strategy the clause would be extended with.
///
/// Returns one of "filtered_query", "query" or "filter".
#[pyfunction]
fn classify(clause: &str) -> PyResult<String> {
    let builder = FilterBuilder::from_json(clause).map_err(to_py_err)?;
    Ok(builder.strategy().name().to_string())
}

/// esfilter Python module.
#[pymodule]
fn _esfilter(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(append_filters, m)?)?;
    m.add_function(wrap_pyfunction!(classify, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
