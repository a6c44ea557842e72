//! Run command implementation
//!
//! Answers every query of a session file in order within one budget. A
//! refused query is reported and the run continues with the next one.

use super::report::{format_budget, format_outcome, render_structured, QueryOutcome, SessionReport};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, load_config, OutputFormat, RunArgs, SessionSpec};
use crate::dp::{DpQuerySession, LaplaceNoise};
use crate::store::RatingStore;

/// Open the session described by `spec` and answer its queries
pub fn execute_session(spec: &SessionSpec) -> Result<SessionReport, String> {
    let options = spec
        .store
        .csv_options()
        .ok_or_else(|| format!("Invalid delimiter: {:?}", spec.store.delimiter))?;
    let store = RatingStore::from_csv_path(&spec.store.path, &options)
        .map_err(|e| format!("Record store error: {e}"))?;

    let noise = spec.noise.seed.map_or_else(LaplaceNoise::new, LaplaceNoise::seeded);
    let mut session = DpQuerySession::with_noise(store, spec.budget.total, noise)
        .map_err(|e| format!("Session error: {e}"))?;

    let queries = spec
        .queries
        .iter()
        .map(|query| {
            let cached = session.engine().cache().contains(&query.key());
            let result = session.get_count(&query.item, query.threshold, query.epsilon);
            QueryOutcome::new(query, cached, result)
        })
        .collect();

    Ok(SessionReport { queries, budget: session.summary() })
}

pub fn run_session(args: RunArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Verbose,
        &format!("Loading session: {}", args.config.display()),
    );

    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &args);

    if spec.is_overcommitted() {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Warning: queries plan to spend {:.4} of a {:.4} budget; later queries will be refused",
                spec.planned_spend(),
                spec.budget.total
            ),
        );
    }

    let report = execute_session(&spec)?;

    match args.format {
        OutputFormat::Text => {
            for outcome in &report.queries {
                println!("{}", format_outcome(outcome));
            }
            log(level, LogLevel::Normal, "");
            log(level, LogLevel::Normal, "Budget:");
            log(level, LogLevel::Normal, &format_budget(&report.budget));
        }
        format => println!("{}", render_structured(&report, format)?),
    }

    Ok(())
}
