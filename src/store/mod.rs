//! Record store
//!
//! Supplies the rating records a query session counts over. The query engine
//! only depends on [`RecordProvider`]; [`RatingStore`] is the in-memory
//! implementation loaded from a delimited text file.

mod error;
mod rating;
mod reader;

use std::path::Path;
use std::sync::Arc;

pub use error::{Result, StoreError};
pub use rating::Rating;
pub use reader::{delimiter_byte, read_ratings, read_ratings_path, CsvOptions};

/// Read-only provider of rating records
pub trait RecordProvider {
    /// Iterate over every record in store order
    fn records(&self) -> impl Iterator<Item = &Rating>;
}

impl RecordProvider for Vec<Rating> {
    fn records(&self) -> impl Iterator<Item = &Rating> {
        self.iter()
    }
}

impl<P: RecordProvider> RecordProvider for Arc<P> {
    fn records(&self) -> impl Iterator<Item = &Rating> {
        (**self).records()
    }
}

/// In-memory rating store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingStore {
    ratings: Vec<Rating>,
}

impl RatingStore {
    pub fn new(ratings: Vec<Rating>) -> Self {
        Self { ratings }
    }

    /// Load a store from a delimited text file
    pub fn from_csv_path<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Self> {
        let ratings = read_ratings_path(path.as_ref(), options)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            records = ratings.len(),
            "loaded rating store"
        );
        Ok(Self::new(ratings))
    }

    /// Load a store from any reader
    pub fn from_reader<R: std::io::Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        Ok(Self::new(read_ratings(reader, options)?))
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl RecordProvider for RatingStore {
    fn records(&self) -> impl Iterator<Item = &Rating> {
        self.ratings.iter()
    }
}

impl From<Vec<Rating>> for RatingStore {
    fn from(ratings: Vec<Rating>) -> Self {
        Self::new(ratings)
    }
}
