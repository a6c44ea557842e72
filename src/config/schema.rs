//! Session configuration schema
//!
//! A session file names the ratings file, the total privacy budget and,
//! optionally, a noise seed and a list of queries to answer in order.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dp::QueryKey;
use crate::store::{delimiter_byte, CsvOptions};

/// Complete session specification (YAML root)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSpec {
    /// Record store location and format
    pub store: StoreSpec,
    /// Privacy budget
    pub budget: BudgetSpec,
    /// Noise source settings
    #[serde(default)]
    pub noise: NoiseSpec,
    /// Queries answered in order by `dpquery run`
    #[serde(default)]
    pub queries: Vec<QuerySpec>,
}

/// Ratings file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSpec {
    /// Path to the delimited ratings file (relative to the config file)
    pub path: PathBuf,
    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Skip the first line
    #[serde(default)]
    pub has_headers: bool,
}

fn default_delimiter() -> char {
    ','
}

impl Default for StoreSpec {
    fn default() -> Self {
        Self { path: PathBuf::new(), delimiter: default_delimiter(), has_headers: false }
    }
}

impl StoreSpec {
    /// Reader options, or `None` when the delimiter is unusable
    pub fn csv_options(&self) -> Option<CsvOptions> {
        let delimiter = delimiter_byte(self.delimiter)?;
        Some(CsvOptions { delimiter, has_headers: self.has_headers })
    }
}

/// Privacy budget settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSpec {
    /// Total epsilon for the session
    pub total: f64,
}

impl Default for BudgetSpec {
    fn default() -> Self {
        Self { total: 1.0 }
    }
}

/// Noise settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseSpec {
    /// Seed for reproducible noise; OS entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// One count query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub item: String,
    pub threshold: i64,
    pub epsilon: f64,
}

impl QuerySpec {
    pub fn key(&self) -> QueryKey {
        QueryKey::new(self.item.clone(), self.threshold)
    }
}

impl SessionSpec {
    /// Number of distinct `(item, threshold)` pairs among the queries
    pub fn distinct_queries(&self) -> usize {
        self.queries.iter().map(QuerySpec::key).collect::<HashSet<_>>().len()
    }

    /// Epsilon the queries would spend if every one were admitted
    ///
    /// Only the first occurrence of each `(item, threshold)` is charged;
    /// repeats are answered from the cache.
    pub fn planned_spend(&self) -> f64 {
        let mut seen = HashSet::new();
        self.queries
            .iter()
            .filter(|q| seen.insert(q.key()))
            .map(|q| q.epsilon)
            .sum()
    }

    /// Whether the planned spend exceeds the budget
    pub fn is_overcommitted(&self) -> bool {
        self.planned_spend() > self.budget.total
    }
}
