//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;

/// dpquery: differentially private count queries over rating data
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "dpquery")]
#[command(version)]
#[command(about = "Answer count queries over a ratings file under a differential privacy budget")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except results and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Answer a single count query against a ratings file
    Count(CountArgs),

    /// Answer every query of a session file within one budget
    Run(RunArgs),

    /// Validate a session file without answering any query
    Validate(ValidateArgs),

    /// Display information about a session file
    Info(InfoArgs),
}

/// Arguments for the count command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CountArgs {
    /// Path to the ratings file (user, item, date, score)
    #[arg(value_name = "DB")]
    pub db: PathBuf,

    /// Total privacy budget of the session
    #[arg(short, long)]
    pub budget: f64,

    /// Item to count ratings for
    #[arg(short, long)]
    pub item: String,

    /// Minimum score (inclusive)
    #[arg(short, long, allow_negative_numbers = true)]
    pub threshold: i64,

    /// Epsilon spent on this query
    #[arg(short, long, allow_negative_numbers = true)]
    pub epsilon: f64,

    /// Random seed for reproducible noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Field delimiter of the ratings file
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Skip the first line of the ratings file
    #[arg(long)]
    pub has_headers: bool,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Path to YAML session file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override the noise seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML session file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML session file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a SessionSpec
pub fn apply_overrides(spec: &mut crate::config::SessionSpec, args: &RunArgs) {
    if let Some(seed) = args.seed {
        spec.noise.seed = Some(seed);
    }
}
