/// Filter-merging engine for bool/filtered query documents.
///
/// Appending filters to a clause runs through three stages:
///
/// ```text
/// Caller input (serde_json::Value)
///       ↓
/// Validation + defensive copy   (builder.rs)
///       ↓
/// Shape classification          (shape.rs)
///       ↓
/// Strategy application          (strategy.rs)
///       ↓
/// Merged clause, ready to serialize
/// ```
///
/// Document keys and node constructors live in types.rs.
pub mod builder;
pub mod shape;
pub mod strategy;
pub mod types;

// Re-export key types for convenience
pub use builder::{normalize_filters, validate_clause, FilterBuilder};
pub use shape::{classify, classify_filter, FilterShape};
pub use strategy::Strategy;
pub use types::*;
