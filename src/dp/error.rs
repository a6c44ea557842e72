//! Error types for the differential privacy query module.

use thiserror::Error;

use super::cache::QueryKey;

/// DP query errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DpError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Privacy budget depleted: requested {requested:.4}, remaining {remaining:.4}")]
    BudgetDepleted { requested: f64, remaining: f64 },

    #[error("Query {0} already has a cached answer")]
    DuplicateEntry(QueryKey),

    #[error("DP error: {0}")]
    Internal(String),
}

impl DpError {
    /// Whether the error is the terminal "no budget left for this epsilon" signal
    pub fn is_budget_depleted(&self) -> bool {
        matches!(self, DpError::BudgetDepleted { .. })
    }
}

/// Result type for DP operations
pub type Result<T> = std::result::Result<T, DpError>;
