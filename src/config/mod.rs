//! Session configuration
//!
//! YAML session files, their validation, and the command-line interface types.
//!
//! ```yaml
//! store:
//!   path: ratings.csv
//! budget:
//!   total: 1.0
//! queries:
//!   - item: "Heat"
//!     threshold: 4
//!     epsilon: 0.1
//! ```

pub mod cli;
mod loader;
mod schema;
pub mod validate;

pub use cli::{
    apply_overrides, parse_args, Cli, Command, CountArgs, InfoArgs, OutputFormat, RunArgs,
    ValidateArgs,
};
pub use loader::{load_config, parse_config};
pub use schema::{BudgetSpec, NoiseSpec, QuerySpec, SessionSpec, StoreSpec};
pub use validate::{validate_config, ValidationError};
