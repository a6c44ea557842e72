//! Privacy budget ledger.

use serde::{Deserialize, Serialize};

use super::error::{DpError, Result};

/// Session-scoped privacy budget ledger
///
/// Tracks the total epsilon allotted to a session and the cumulative spend.
/// `spent <= total` holds after every operation: [`BudgetLedger::reserve`]
/// checks admission before mutating and never applies a partial debit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLedger {
    /// Total epsilon available to the session
    total: f64,
    /// Epsilon consumed so far
    spent: f64,
}

impl BudgetLedger {
    /// Create a ledger with nothing spent
    pub fn new(total: f64) -> Result<Self> {
        if !(total.is_finite() && total > 0.0) {
            return Err(DpError::InvalidParameter(format!(
                "privacy budget must be a finite value > 0, got {total}"
            )));
        }
        Ok(Self { total, spent: 0.0 })
    }

    /// Total budget
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Budget consumed so far
    pub fn spent(&self) -> f64 {
        self.spent
    }

    /// Budget still available
    pub fn remaining(&self) -> f64 {
        self.total - self.spent
    }

    /// Check whether no budget is left at all
    pub fn is_depleted(&self) -> bool {
        self.remaining() <= 0.0
    }

    /// Debit `amount` from the ledger
    ///
    /// Fails with [`DpError::BudgetDepleted`] when `amount` exceeds the
    /// remaining budget, leaving the ledger untouched. Spending exactly
    /// [`BudgetLedger::remaining`] is always admitted.
    pub fn reserve(&mut self, amount: f64) -> Result<()> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(DpError::InvalidParameter(format!(
                "reserved amount must be a finite value > 0, got {amount}"
            )));
        }

        if amount > self.remaining() {
            return Err(DpError::BudgetDepleted {
                requested: amount,
                remaining: self.remaining(),
            });
        }

        // spent + remaining can round one ulp above total
        self.spent = (self.spent + amount).min(self.total);
        Ok(())
    }
}
