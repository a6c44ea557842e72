//! Result reports shared by the query commands

use serde::Serialize;

use crate::config::{OutputFormat, QuerySpec};
use crate::dp::{BudgetSummary, DpError};

/// Outcome of one count query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryOutcome {
    pub item: String,
    pub threshold: i64,
    pub epsilon: f64,
    /// Noisy count, absent when the query was refused
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<f64>,
    /// Answered from the cache without spending budget
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryOutcome {
    pub fn new(query: &QuerySpec, cached: bool, result: Result<f64, DpError>) -> Self {
        let (answer, error) = match result {
            Ok(answer) => (Some(answer), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            item: query.item.clone(),
            threshold: query.threshold,
            epsilon: query.epsilon,
            answer,
            cached: cached && answer.is_some(),
            error,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}

/// All outcomes of a session plus its final budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub queries: Vec<QueryOutcome>,
    pub budget: BudgetSummary,
}

/// One line per query for text output
pub fn format_outcome(outcome: &QueryOutcome) -> String {
    let query = format!(
        "{:?} score >= {} (epsilon={})",
        outcome.item, outcome.threshold, outcome.epsilon
    );
    match (&outcome.answer, &outcome.error) {
        (Some(answer), _) if outcome.cached => format!("{query}: {answer:.4} (cached)"),
        (Some(answer), _) => format!("{query}: {answer:.4}"),
        (None, Some(error)) => format!("{query}: refused - {error}"),
        (None, None) => format!("{query}: no answer"),
    }
}

/// Budget block for text output
pub fn format_budget(budget: &BudgetSummary) -> String {
    format!(
        "  Total budget: {:.4}\n  Spent: {:.4}\n  Remaining: {:.4}\n  Distinct queries answered: {}",
        budget.total, budget.spent, budget.remaining, budget.cached_queries
    )
}

/// Serialize a report as JSON or YAML
///
/// Text output is written by each command and is an error here.
pub fn render_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization error: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization error: {e}"))
        }
        OutputFormat::Text => Err("Text output has no structured rendering".to_string()),
    }
}
