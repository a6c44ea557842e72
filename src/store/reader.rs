//! Delimited-text ingestion of rating records.
//!
//! One record per line with four fields `user, item, date, score`. Fields may
//! be double-quoted; the score is parsed as an integer.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{Result, StoreError};
use super::rating::Rating;

const FIELD_COUNT: usize = 4;

/// Characters the reader cannot use as a field delimiter
const RESERVED_DELIMITERS: [char; 3] = ['"', '\r', '\n'];

/// Convert a delimiter character to the byte the reader expects
///
/// Returns `None` for non-ASCII characters, the quote character and line breaks.
pub fn delimiter_byte(delimiter: char) -> Option<u8> {
    if RESERVED_DELIMITERS.contains(&delimiter) {
        return None;
    }
    u8::try_from(delimiter).ok().filter(u8::is_ascii)
}

/// Parsing options for the ratings file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Field delimiter byte
    pub delimiter: u8,
    /// Whether the first line is a header row to skip
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',', has_headers: false }
    }
}

impl CsvOptions {
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

/// Read all ratings from a file
pub fn read_ratings_path(path: &Path, options: &CsvOptions) -> Result<Vec<Rating>> {
    let file = File::open(path)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    read_ratings(file, options)
}

/// Read all ratings from any reader
pub fn read_ratings<R: Read>(reader: R, options: &CsvOptions) -> Result<Vec<Rating>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .quote(b'"')
        .flexible(true)
        .from_reader(reader);

    let mut ratings = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);

        if record.len() != FIELD_COUNT {
            return Err(StoreError::FieldCount { line, found: record.len() });
        }

        let raw_score = &record[3];
        let score = raw_score
            .trim()
            .parse::<i64>()
            .map_err(|_| StoreError::InvalidScore { line, value: raw_score.to_string() })?;

        ratings.push(Rating::new(&record[0], &record[1], &record[2], score));
    }

    Ok(ratings)
}
