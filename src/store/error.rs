//! Record store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading rating records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open record store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: expected 4 fields (user, item, date, score), found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("Line {line}: score {value:?} is not an integer")]
    InvalidScore { line: u64, value: String },
}

/// Result type for record store operations
pub type Result<T> = std::result::Result<T, StoreError>;
