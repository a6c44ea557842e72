//! Query sessions over a record store.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::engine::{BudgetSummary, QueryEngine};
use super::error::{DpError, Result};
use super::noise::{LaplaceNoise, NoiseSource};
use crate::store::{CsvOptions, RatingStore, RecordProvider};

/// Differentially private query session
///
/// Owns the record store and the session's accounting state. Queries take
/// `&mut self`, so admission and debit can never interleave.
#[derive(Debug, Clone)]
pub struct DpQuerySession<P, N = LaplaceNoise> {
    store: P,
    engine: QueryEngine<N>,
}

impl DpQuerySession<RatingStore, LaplaceNoise> {
    /// Load the ratings file at `path` and open a session with `privacy_budget`
    pub fn open<Q: AsRef<Path>>(
        path: Q,
        privacy_budget: f64,
        options: &CsvOptions,
    ) -> crate::error::Result<Self> {
        let store = RatingStore::from_csv_path(path, options)?;
        Ok(Self::new(store, privacy_budget)?)
    }
}

impl<P: RecordProvider> DpQuerySession<P, LaplaceNoise> {
    pub fn new(store: P, privacy_budget: f64) -> Result<Self> {
        Ok(Self { store, engine: QueryEngine::new(privacy_budget)? })
    }
}

impl<P: RecordProvider, N: NoiseSource> DpQuerySession<P, N> {
    pub fn with_noise(store: P, privacy_budget: f64, noise: N) -> Result<Self> {
        Ok(Self { store, engine: QueryEngine::with_noise(privacy_budget, noise)? })
    }

    /// Noisy count of ratings for `item` scored at least `threshold`
    pub fn get_count(&mut self, item: &str, threshold: i64, epsilon: f64) -> Result<f64> {
        self.engine.get_count(&self.store, item, threshold, epsilon)
    }

    pub fn remaining_budget(&self) -> f64 {
        self.engine.remaining_budget()
    }

    pub fn summary(&self) -> BudgetSummary {
        self.engine.summary()
    }

    pub fn engine(&self) -> &QueryEngine<N> {
        &self.engine
    }

    pub fn store(&self) -> &P {
        &self.store
    }
}

/// Session that can be queried from several threads
///
/// The store is read without locking. Ledger, cache and noise source sit
/// behind one mutex held for the whole cache-check, reserve, scan and insert
/// sequence, so two callers can never both pass an admission check that only
/// one of them can afford.
#[derive(Debug)]
pub struct SharedSession<P, N = LaplaceNoise> {
    store: Arc<P>,
    engine: Mutex<QueryEngine<N>>,
}

impl<P: RecordProvider> SharedSession<P, LaplaceNoise> {
    pub fn new(store: Arc<P>, privacy_budget: f64) -> Result<Self> {
        Ok(Self { store, engine: Mutex::new(QueryEngine::new(privacy_budget)?) })
    }
}

impl<P: RecordProvider, N: NoiseSource> SharedSession<P, N> {
    pub fn with_noise(store: Arc<P>, privacy_budget: f64, noise: N) -> Result<Self> {
        Ok(Self { store, engine: Mutex::new(QueryEngine::with_noise(privacy_budget, noise)?) })
    }

    fn lock(&self) -> Result<MutexGuard<'_, QueryEngine<N>>> {
        self.engine
            .lock()
            .map_err(|_| DpError::Internal("session lock poisoned".to_string()))
    }

    pub fn get_count(&self, item: &str, threshold: i64, epsilon: f64) -> Result<f64> {
        self.lock()?.get_count(self.store.as_ref(), item, threshold, epsilon)
    }

    pub fn remaining_budget(&self) -> Result<f64> {
        Ok(self.lock()?.remaining_budget())
    }

    pub fn summary(&self) -> Result<BudgetSummary> {
        Ok(self.lock()?.summary())
    }
}

impl<P, N> From<DpQuerySession<P, N>> for SharedSession<P, N> {
    fn from(session: DpQuerySession<P, N>) -> Self {
        Self { store: Arc::new(session.store), engine: Mutex::new(session.engine) }
    }
}
