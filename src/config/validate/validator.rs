//! Configuration validation logic
//!
//! Validates session specifications for correctness before a session opens.

use super::error::ValidationError;
use crate::config::schema::SessionSpec;

/// Validate a session specification
///
/// Checks:
/// - The ratings file exists
/// - The budget and every query epsilon are positive and finite
/// - The delimiter is usable by the record reader
///
/// A planned spend above the budget is not an error: later queries are
/// refused at run time.
pub fn validate_config(spec: &SessionSpec) -> Result<(), ValidationError> {
    // Validate store path (skip in tests where files may not exist)
    #[cfg(not(test))]
    if !spec.store.path.exists() {
        return Err(ValidationError::StorePathNotFound(
            spec.store.path.display().to_string(),
        ));
    }

    if !(spec.budget.total.is_finite() && spec.budget.total > 0.0) {
        return Err(ValidationError::InvalidBudget(spec.budget.total));
    }

    if spec.store.csv_options().is_none() {
        return Err(ValidationError::InvalidDelimiter(spec.store.delimiter));
    }

    for (index, query) in spec.queries.iter().enumerate() {
        if query.item.is_empty() {
            return Err(ValidationError::EmptyItem { index });
        }
        if !(query.epsilon.is_finite() && query.epsilon > 0.0) {
            return Err(ValidationError::InvalidEpsilon { index, value: query.epsilon });
        }
    }

    Ok(())
}
