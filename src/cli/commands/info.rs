//! Info command implementation

use serde::Serialize;

use super::report::render_structured;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, InfoArgs, OutputFormat, SessionSpec};

/// Session file overview, including derived spend figures
#[derive(Debug, Serialize)]
struct SessionInfo<'a> {
    #[serde(flatten)]
    spec: &'a SessionSpec,
    distinct_queries: usize,
    planned_spend: f64,
}

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration Info:");
            println!();
            println!("Ratings file: {}", spec.store.path.display());
            println!("Budget: {}", spec.budget.total);
            println!(
                "Queries: {} ({} distinct)",
                spec.queries.len(),
                spec.distinct_queries()
            );
            println!("Planned spend: {:.4}", spec.planned_spend());

            if spec.noise.seed.is_some() {
                println!("Noise: seeded");
            }
            if spec.is_overcommitted() {
                println!("Warning: planned spend exceeds the budget");
            }
        }
        format => {
            let info = SessionInfo {
                spec: &spec,
                distinct_queries: spec.distinct_queries(),
                planned_spend: spec.planned_spend(),
            };
            println!("{}", render_structured(&info, format)?);
        }
    }

    Ok(())
}
