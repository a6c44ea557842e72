//! Memoization of released query answers.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{DpError, Result};

/// Discriminating parameters of a count query
///
/// Epsilon is deliberately not part of the key: the first answer released for
/// an `(item, threshold)` pair is returned for every later identical query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    /// Item identifier
    pub item: String,
    /// Minimum score (inclusive)
    pub threshold: i64,
}

impl QueryKey {
    pub fn new(item: impl Into<String>, threshold: i64) -> Self {
        Self { item: item.into(), threshold }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, >= {})", self.item, self.threshold)
    }
}

/// Write-once cache of noisy answers
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, f64>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Previously released answer for `key`, if any
    pub fn lookup(&self, key: &QueryKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Store the answer for `key`
    ///
    /// An existing entry is never overwritten; inserting twice is a logic error.
    pub fn insert(&mut self, key: QueryKey, value: f64) -> Result<()> {
        use std::collections::hash_map::Entry;

        match self.entries.entry(key) {
            Entry::Occupied(occupied) => Err(DpError::DuplicateEntry(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                vacant.insert(value);
                Ok(())
            }
        }
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
