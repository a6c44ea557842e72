//! Crate-level error type.

use thiserror::Error;

use crate::config::ValidationError;
use crate::dp::DpError;
use crate::store::StoreError;

/// Errors surfaced by sessions, configuration and record loading
#[derive(Debug, Error)]
pub enum Error {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Dp(#[from] DpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;
