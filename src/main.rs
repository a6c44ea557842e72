//! dpquery CLI
//!
//! Differentially private count queries over a ratings file.
//!
//! # Usage
//!
//! ```bash
//! # One query against a ratings file with a fresh 1.0 budget
//! dpquery count ratings.csv --budget 1.0 --item "Heat" --threshold 4 --epsilon 0.1
//!
//! # Answer every query of a session file within one budget
//! dpquery run session.yaml
//!
//! # Validate a session file
//! dpquery validate session.yaml --detailed
//!
//! # Show session file info
//! dpquery info session.yaml --format json
//! ```

use clap::Parser;
use dpquery::cli::{init_tracing, run_command, Cli, LogLevel};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.verbose, cli.quiet));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
