//! Rating record type.

use serde::{Deserialize, Serialize};

/// A single rating: `user` gave `item` a `score` on `date`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// User identifier (e.g. an email address)
    pub user: String,
    /// Rated item identifier
    pub item: String,
    /// Date as it appears in the source file
    pub date: String,
    /// Integer score, observed range 1-5
    pub score: i64,
}

impl Rating {
    pub fn new(
        user: impl Into<String>,
        item: impl Into<String>,
        date: impl Into<String>,
        score: i64,
    ) -> Self {
        Self { user: user.into(), item: item.into(), date: date.into(), score }
    }

    /// Whether this rating is for `item` with a score of at least `threshold`
    pub fn matches(&self, item: &str, threshold: i64) -> bool {
        self.item == item && self.score >= threshold
    }
}
