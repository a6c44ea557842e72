//! CLI argument parsing
//!
//! This module provides the command-line interface for dpquery.
//!
//! # Usage
//!
//! ```bash
//! dpquery count ratings.csv --budget 1.0 --item "Heat" --threshold 4 --epsilon 0.1
//! dpquery run session.yaml --seed 7 --format json
//! dpquery validate session.yaml --detailed
//! dpquery info session.yaml
//! ```

mod core;
mod types;


pub use core::{
    apply_overrides, parse_args, Cli, Command, CountArgs, InfoArgs, RunArgs, ValidateArgs,
};
pub use types::OutputFormat;
