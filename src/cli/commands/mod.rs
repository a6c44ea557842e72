//! CLI command implementations

mod count;
mod info;
mod report;
mod run;
mod validate;


use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Count(args) => count::run_count(args, log_level),
        Command::Run(args) => run::run_session(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
    }
}
