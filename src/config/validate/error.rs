//! Validation error types
//!
//! Defines all validation error variants for session specifications.

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Record store path does not exist: {0}")]
    StorePathNotFound(String),

    #[error("Invalid privacy budget: {0} (must be a finite value > 0.0)")]
    InvalidBudget(f64),

    #[error("Invalid delimiter: {0:?} (must be a single ASCII character other than '\"', '\\r' or '\\n')")]
    InvalidDelimiter(char),

    #[error("Query {index}: invalid epsilon {value} (must be a finite value > 0.0)")]
    InvalidEpsilon { index: usize, value: f64 },

    #[error("Query {index}: item name cannot be empty")]
    EmptyItem { index: usize },
}
