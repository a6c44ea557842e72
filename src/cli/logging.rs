//! Logging utilities for CLI output

use tracing_subscriber::EnvFilter;

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    /// Map the global `--verbose` / `--quiet` flags to a level
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }

    /// Default `tracing` directive when `RUST_LOG` is unset
    fn default_directive(self) -> &'static str {
        match self {
            LogLevel::Quiet => "error",
            LogLevel::Normal => "warn",
            LogLevel::Verbose => "dpquery=debug",
        }
    }
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

/// Install the stderr `tracing` subscriber for library diagnostics
///
/// `RUST_LOG` takes precedence over the CLI level. Calling this twice is a
/// no-op.
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.default_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
