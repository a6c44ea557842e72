//! Count command implementation

use serde::Serialize;

use super::report::render_structured;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{CountArgs, OutputFormat};
use crate::dp::{BudgetSummary, DpQuerySession, LaplaceNoise};
use crate::store::{delimiter_byte, CsvOptions, RatingStore};

/// Result of a one-off count query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountReport {
    pub item: String,
    pub threshold: i64,
    pub epsilon: f64,
    pub answer: f64,
    pub budget: BudgetSummary,
}

/// Reader options from the count arguments
pub fn csv_options(args: &CountArgs) -> Result<CsvOptions, String> {
    let delimiter = delimiter_byte(args.delimiter).ok_or_else(|| {
        format!(
            "Delimiter must be a single ASCII character other than '\"', '\\r' or '\\n', got {:?}",
            args.delimiter
        )
    })?;
    Ok(CsvOptions::default().with_delimiter(delimiter).with_headers(args.has_headers))
}

/// Open a session on `args.db` and answer one query
pub fn execute_count(args: &CountArgs) -> Result<CountReport, String> {
    let options = csv_options(args)?;
    let store = RatingStore::from_csv_path(&args.db, &options)
        .map_err(|e| format!("Record store error: {e}"))?;

    let noise = args.seed.map_or_else(LaplaceNoise::new, LaplaceNoise::seeded);
    let mut session = DpQuerySession::with_noise(store, args.budget, noise)
        .map_err(|e| format!("Session error: {e}"))?;

    let answer = session
        .get_count(&args.item, args.threshold, args.epsilon)
        .map_err(|e| format!("Query failed: {e}"))?;

    Ok(CountReport {
        item: args.item.clone(),
        threshold: args.threshold,
        epsilon: args.epsilon,
        answer,
        budget: session.summary(),
    })
}

pub fn run_count(args: CountArgs, level: LogLevel) -> Result<(), String> {
    log(level, LogLevel::Verbose, &format!("Loading ratings: {}", args.db.display()));

    let report = execute_count(&args)?;

    match args.format {
        OutputFormat::Text => {
            log(
                level,
                LogLevel::Verbose,
                &format!(
                    "Count of {:?} with score >= {} (epsilon={})",
                    report.item, report.threshold, report.epsilon
                ),
            );
            println!("{:.4}", report.answer);
            log(
                level,
                LogLevel::Verbose,
                &format!("Remaining budget: {:.4}", report.budget.remaining),
            );
        }
        format => println!("{}", render_structured(&report, format)?),
    }

    Ok(())
}
