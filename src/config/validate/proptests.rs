//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;
use std::path::PathBuf;

fn arb_query() -> impl Strategy<Value = QuerySpec> {
    ("[a-zA-Z ]{1,16}", 1i64..=5, 1e-3f64..2.0)
        .prop_map(|(item, threshold, epsilon)| QuerySpec { item, threshold, epsilon })
}

fn arb_valid_spec() -> impl Strategy<Value = SessionSpec> {
    (
        1e-3f64..100.0,                                 // total budget
        proptest::option::of(any::<u64>()),             // seed
        prop::collection::vec(arb_query(), 0..12),      // queries
        prop::sample::select(vec![',', ';', '\t', '|']), // delimiter
    )
        .prop_map(|(total, seed, queries, delimiter)| SessionSpec {
            store: StoreSpec { path: PathBuf::from("ratings.csv"), delimiter, has_headers: false },
            budget: BudgetSpec { total },
            noise: NoiseSpec { seed },
            queries,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_non_positive_budget_fails(spec in arb_valid_spec(), total in -10.0f64..=0.0) {
        let mut spec = spec;
        spec.budget.total = total;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidBudget(_))
        ));
    }

    #[test]
    fn prop_non_positive_epsilon_fails(spec in arb_valid_spec(), epsilon in -10.0f64..=0.0) {
        let mut spec = spec;
        let index = spec.queries.len();
        spec.queries.push(QuerySpec { item: "Heat".to_string(), threshold: 1, epsilon });
        prop_assert_eq!(
            validate_config(&spec),
            Err(ValidationError::InvalidEpsilon { index, value: epsilon })
        );
    }

    #[test]
    fn prop_planned_spend_bounded_by_sum(spec in arb_valid_spec()) {
        let total: f64 = spec.queries.iter().map(|q| q.epsilon).sum();
        prop_assert!(spec.planned_spend() <= total + 1e-9);
        prop_assert!(spec.distinct_queries() <= spec.queries.len());
    }
}
