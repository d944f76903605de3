pub mod clause;
pub mod config;
pub mod error;

#[cfg(feature = "python")]
pub mod python;

pub use clause::{FilterBuilder, Strategy};
pub use error::{ClauseViolation, FilterError};
