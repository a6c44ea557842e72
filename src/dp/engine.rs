//! Count query engine.
//!
//! Orchestrates one Laplace-mechanism count query:
//! 1. Reject non-positive epsilon
//! 2. Return the cached answer for a repeated `(item, threshold)` (free)
//! 3. Reserve epsilon from the ledger (fail fast, nothing else happens)
//! 4. Scan the records once for the true count
//! 5. Add Laplace noise with scale `SENSITIVITY / epsilon`
//! 6. Cache and return the noisy count

use serde::{Deserialize, Serialize};

use super::budget::BudgetLedger;
use super::cache::{QueryCache, QueryKey};
use super::error::{DpError, Result};
use super::noise::{LaplaceNoise, NoiseSource};
use crate::store::RecordProvider;

/// Maximum change in a count from adding or removing one record
pub const SENSITIVITY: f64 = 1.0;

/// Read-only snapshot of a session's accounting state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total: f64,
    pub spent: f64,
    pub remaining: f64,
    pub cached_queries: usize,
}

/// Budget ledger, answer cache and noise source of one session
#[derive(Debug, Clone)]
pub struct QueryEngine<N = LaplaceNoise> {
    ledger: BudgetLedger,
    cache: QueryCache,
    noise: N,
}

impl QueryEngine<LaplaceNoise> {
    /// Create an engine with an OS-seeded Laplace sampler
    pub fn new(total_budget: f64) -> Result<Self> {
        Self::with_noise(total_budget, LaplaceNoise::new())
    }
}

impl<N: NoiseSource> QueryEngine<N> {
    /// Create an engine with a custom noise source
    pub fn with_noise(total_budget: f64, noise: N) -> Result<Self> {
        Ok(Self { ledger: BudgetLedger::new(total_budget)?, cache: QueryCache::new(), noise })
    }

    /// Noisy number of records for `item` with score `>= threshold`
    ///
    /// Repeated `(item, threshold)` pairs return the first released answer and
    /// cost nothing, whatever epsilon the repeat asks for. On error neither the
    /// ledger nor the cache is modified.
    pub fn get_count<P: RecordProvider + ?Sized>(
        &mut self,
        store: &P,
        item: &str,
        threshold: i64,
        epsilon: f64,
    ) -> Result<f64> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(DpError::InvalidParameter(format!(
                "epsilon must be a finite value > 0, got {epsilon}"
            )));
        }

        let key = QueryKey::new(item, threshold);
        if let Some(answer) = self.cache.lookup(&key) {
            tracing::debug!(%key, answer, "answered from cache, no budget charged");
            return Ok(answer);
        }

        if let Err(err) = self.ledger.reserve(epsilon) {
            tracing::debug!(%key, epsilon, remaining = self.ledger.remaining(), "query refused");
            return Err(err);
        }

        let true_count = store.records().filter(|r| r.matches(item, threshold)).count();
        let noise = self.noise.sample_laplace(SENSITIVITY / epsilon);
        let noisy_count = true_count as f64 + noise;

        self.cache.insert(key.clone(), noisy_count)?;
        tracing::debug!(
            %key,
            epsilon,
            answer = noisy_count,
            remaining = self.ledger.remaining(),
            "query answered"
        );

        Ok(noisy_count)
    }

    pub fn remaining_budget(&self) -> f64 {
        self.ledger.remaining()
    }

    pub fn ledger(&self) -> &BudgetLedger {
        &self.ledger
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    pub fn summary(&self) -> BudgetSummary {
        BudgetSummary {
            total: self.ledger.total(),
            spent: self.ledger.spent(),
            remaining: self.ledger.remaining(),
            cached_queries: self.cache.len(),
        }
    }
}
