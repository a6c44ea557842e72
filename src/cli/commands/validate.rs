//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, SessionSpec, ValidateArgs};

/// Format store configuration as a string
pub fn format_store_info(spec: &SessionSpec) -> String {
    let mut lines = vec![format!("  Ratings file: {}", spec.store.path.display())];
    lines.push(format!("  Delimiter: {:?}", spec.store.delimiter));
    if spec.store.has_headers {
        lines.push("  Header row: skipped".to_string());
    }
    lines.join("\n")
}

/// Format budget configuration as a string
pub fn format_budget_info(spec: &SessionSpec) -> String {
    let mut lines = vec![
        format!("  Total budget: {}", spec.budget.total),
        format!("  Planned spend: {:.4}", spec.planned_spend()),
    ];
    if spec.is_overcommitted() {
        lines.push("  Warning: planned spend exceeds the budget".to_string());
    }
    lines.join("\n")
}

/// Format noise configuration as a string
pub fn format_noise_info(spec: &SessionSpec) -> String {
    match spec.noise.seed {
        Some(seed) => format!("  Noise: Laplace, seed {seed}"),
        None => "  Noise: Laplace, OS entropy".to_string(),
    }
}

/// Format queries as a string
pub fn format_queries_info(spec: &SessionSpec) -> Option<String> {
    if spec.queries.is_empty() {
        return None;
    }
    let mut lines = vec![format!(
        "  Queries: {} ({} distinct)",
        spec.queries.len(),
        spec.distinct_queries()
    )];
    for query in &spec.queries {
        lines.push(format!(
            "    {:?} >= {} (epsilon={})",
            query.item, query.threshold, query.epsilon
        ));
    }
    Some(lines.join("\n"))
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &SessionSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_store_info(spec));
    println!();
    println!("{}", format_budget_info(spec));
    println!();
    println!("{}", format_noise_info(spec));

    if let Some(queries) = format_queries_info(spec) {
        println!();
        println!("{queries}");
    }
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_config(&args.config).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        print_detailed_summary(&spec);
    }

    Ok(())
}
