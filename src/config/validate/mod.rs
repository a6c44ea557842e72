//! Configuration validation
//!
//! Validates session specifications for correctness before a session opens.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_config;
