//! Differentially Private Count Queries
//!
//! Laplace-mechanism count queries over a rating store, metered by a
//! session-scoped privacy budget.
//!
//! Each fresh `(item, threshold)` query reserves its epsilon from the
//! [`BudgetLedger`] before any record is read, so a refused query costs no
//! scan and no randomness. Answers are cached per `(item, threshold)`; a
//! repeated query returns the first released answer and is free.
//!
//! # Example
//!
//! ```
//! use dpquery::dp::DpQuerySession;
//! use dpquery::store::{Rating, RatingStore};
//!
//! let store = RatingStore::new(vec![
//!     Rating::new("a@example.com", "Heat", "2020-01-01", 5),
//!     Rating::new("b@example.com", "Heat", "2020-01-02", 2),
//! ]);
//! let mut session = DpQuerySession::new(store, 1.0)?;
//!
//! let noisy = session.get_count("Heat", 4, 0.5)?;
//! assert_eq!(session.get_count("Heat", 4, 0.1)?, noisy);
//! assert!((session.remaining_budget() - 0.5).abs() < 1e-12);
//! # Ok::<(), dpquery::dp::DpError>(())
//! ```
//!
//! # References
//!
//! Dwork, McSherry, Nissim & Smith (2006) - Calibrating Noise to Sensitivity
//! in Private Data Analysis

pub mod budget;
pub mod cache;
pub mod engine;
pub mod error;
pub mod noise;
pub mod session;

#[cfg(test)]
mod tests;

pub use budget::BudgetLedger;
pub use cache::{QueryCache, QueryKey};
pub use engine::{BudgetSummary, QueryEngine, SENSITIVITY};
pub use error::{DpError, Result};
pub use noise::{LaplaceNoise, NoiseSource};
pub use session::{DpQuerySession, SharedSession};
