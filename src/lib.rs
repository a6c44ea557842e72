//! dpquery: differentially private count queries
//!
//! Answers "how many ratings for item X scored at least T" over a private
//! rating file, adding Laplace noise calibrated to `1 / epsilon` and charging
//! each fresh query's epsilon against a finite session budget.
//!
//! - [`store`]: rating records and the delimited-text loader
//! - [`dp`]: budget ledger, Laplace noise, answer cache, query engine, sessions
//! - [`config`]: YAML session files and CLI argument types
//! - [`cli`]: command handlers for the `dpquery` binary

pub mod cli;
pub mod config;
pub mod dp;
pub mod error;
pub mod store;

pub use dp::{DpError, DpQuerySession, SharedSession};
pub use error::{Error, Result};
pub use store::{Rating, RatingStore, RecordProvider};
