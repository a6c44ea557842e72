//! Tests for the differential privacy query module.

#![allow(clippy::module_inception)]
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;

    use crate::dp::{
        DpError, DpQuerySession, LaplaceNoise, NoiseSource, QueryEngine, QueryKey,
        SharedSession, SENSITIVITY,
    };
    use crate::store::{Rating, RatingStore};

    /// Deterministic noise that records every scale it was asked for
    #[derive(Debug, Default)]
    struct FixedNoise {
        value: f64,
        scales: Vec<f64>,
    }

    impl FixedNoise {
        fn new(value: f64) -> Self {
            Self { value, scales: Vec::new() }
        }
    }

    impl NoiseSource for FixedNoise {
        fn sample_laplace(&mut self, scale: f64) -> f64 {
            self.scales.push(scale);
            self.value
        }
    }

    fn movie_store() -> RatingStore {
        RatingStore::new(vec![
            Rating::new("ann@example.com", "Heat", "2021-03-01", 5),
            Rating::new("bob@example.com", "Heat", "2021-03-02", 4),
            Rating::new("cat@example.com", "Heat", "2021-03-02", 2),
            Rating::new("dan@example.com", "Alien", "2021-03-04", 5),
            Rating::new("eve@example.com", "Heat", "2021-03-05", 3),
            Rating::new("fay@example.com", "Alien", "2021-03-06", 1),
        ])
    }

    fn exact_session(total: f64) -> DpQuerySession<RatingStore, FixedNoise> {
        DpQuerySession::with_noise(movie_store(), total, FixedNoise::new(0.0)).unwrap()
    }

    // -------------------------------------------------------------------------
    // Counting
    // -------------------------------------------------------------------------

    #[test]
    fn test_true_count_with_zero_noise() {
        let mut session = exact_session(10.0);
        assert_eq!(session.get_count("Heat", 4, 0.1).unwrap(), 2.0);
        assert_eq!(session.get_count("Heat", 1, 0.1).unwrap(), 4.0);
        assert_eq!(session.get_count("Heat", 6, 0.1).unwrap(), 0.0);
        assert_eq!(session.get_count("Alien", 5, 0.1).unwrap(), 1.0);
    }

    #[test]
    fn test_noise_is_added_to_count() {
        let mut session =
            DpQuerySession::with_noise(movie_store(), 1.0, FixedNoise::new(-0.75)).unwrap();
        assert_relative_eq!(session.get_count("Heat", 4, 0.5).unwrap(), 1.25);
    }

    #[test]
    fn test_unknown_item_counts_zero() {
        let mut session = exact_session(1.0);
        assert_eq!(session.get_count("Vertigo", 1, 0.5).unwrap(), 0.0);
        assert_relative_eq!(session.remaining_budget(), 0.5);
    }

    #[test]
    fn test_threshold_not_range_checked() {
        let mut session = exact_session(1.0);
        assert_eq!(session.get_count("Heat", -10, 0.1).unwrap(), 4.0);
        assert_eq!(session.get_count("Heat", 100, 0.1).unwrap(), 0.0);
    }

    #[test]
    fn test_noise_scale_is_sensitivity_over_epsilon() {
        let mut session = exact_session(10.0);
        session.get_count("Heat", 4, 0.5).unwrap();
        session.get_count("Heat", 3, 2.0).unwrap();

        let scales = &session.engine().noise().scales;
        assert_eq!(scales.len(), 2);
        assert_relative_eq!(scales[0], SENSITIVITY / 0.5);
        assert_relative_eq!(scales[1], SENSITIVITY / 2.0);
    }

    // -------------------------------------------------------------------------
    // Cache
    // -------------------------------------------------------------------------

    #[test]
    fn test_repeated_query_is_idempotent_and_free() {
        let mut session = DpQuerySession::new(movie_store(), 1.0).unwrap();
        let first = session.get_count("Heat", 4, 0.3).unwrap();
        let remaining = session.remaining_budget();

        let second = session.get_count("Heat", 4, 0.3).unwrap();
        assert_eq!(first, second);
        assert_eq!(session.remaining_budget(), remaining);
    }

    #[test]
    fn test_repeat_ignores_requested_epsilon() {
        let mut session = exact_session(1.0);
        let first = session.get_count("Heat", 4, 0.1).unwrap();

        // A costlier or even unaffordable epsilon still gets the cached answer
        assert_eq!(session.get_count("Heat", 4, 0.9).unwrap(), first);
        assert_eq!(session.get_count("Heat", 4, 50.0).unwrap(), first);
        assert_relative_eq!(session.remaining_budget(), 0.9);
        assert_eq!(session.engine().noise().scales.len(), 1);
    }

    #[test]
    fn test_cache_hit_after_depletion() {
        let mut session = exact_session(0.5);
        let answer = session.get_count("Heat", 4, 0.5).unwrap();
        assert!(session.engine().ledger().is_depleted());

        assert_eq!(session.get_count("Heat", 4, 0.5).unwrap(), answer);
        assert!(session.get_count("Heat", 3, 0.1).unwrap_err().is_budget_depleted());
    }

    #[test]
    fn test_different_threshold_is_a_new_query() {
        let mut session = exact_session(1.0);
        session.get_count("Heat", 4, 0.2).unwrap();
        session.get_count("Heat", 5, 0.2).unwrap();
        assert_eq!(session.summary().cached_queries, 2);
        assert_relative_eq!(session.remaining_budget(), 0.6);
    }

    // -------------------------------------------------------------------------
    // Budget
    // -------------------------------------------------------------------------

    #[test]
    fn test_fail_fast_on_depletion() {
        let mut session = exact_session(1.0);
        session.get_count("Heat", 4, 0.6).unwrap();

        let err = session.get_count("Alien", 4, 0.5).unwrap_err();
        assert!(matches!(err, DpError::BudgetDepleted { .. }));
        assert_relative_eq!(session.remaining_budget(), 0.4, epsilon = 1e-12);

        // Refused query drew no noise and cached nothing
        assert_eq!(session.engine().noise().scales.len(), 1);
        assert!(!session.engine().cache().contains(&QueryKey::new("Alien", 4)));

        // A cheaper retry is still admitted
        assert_eq!(session.get_count("Alien", 4, 0.4).unwrap(), 1.0);
    }

    #[test]
    fn test_spending_reported_remaining_is_admitted() {
        let mut session = exact_session(0.3);
        session.get_count("Heat", 4, 0.03).unwrap();

        let remaining = session.remaining_budget();
        assert_eq!(session.get_count("Alien", 1, remaining).unwrap(), 2.0);
        let summary = session.summary();
        assert!(summary.spent <= summary.total);
        assert!(session.engine().ledger().is_depleted());
    }

    #[test]
    fn test_invalid_epsilon_rejected_without_effect() {
        let mut session = exact_session(1.0);
        for epsilon in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = session.get_count("Heat", 4, epsilon).unwrap_err();
            assert!(matches!(err, DpError::InvalidParameter(_)), "epsilon {epsilon}");
        }
        assert_eq!(session.remaining_budget(), 1.0);
        assert!(session.engine().cache().is_empty());
        assert!(session.engine().noise().scales.is_empty());
    }

    #[test]
    fn test_invalid_epsilon_checked_before_cache() {
        let mut session = exact_session(1.0);
        session.get_count("Heat", 4, 0.1).unwrap();
        assert!(matches!(
            session.get_count("Heat", 4, 0.0),
            Err(DpError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_total_budget() {
        assert!(matches!(
            DpQuerySession::new(movie_store(), 0.0),
            Err(DpError::InvalidParameter(_))
        ));
        assert!(matches!(QueryEngine::new(-2.0), Err(DpError::InvalidParameter(_))));
    }

    #[test]
    fn test_summary_tracks_spend() {
        let mut session = exact_session(2.0);
        session.get_count("Heat", 4, 0.5).unwrap();
        session.get_count("Alien", 1, 0.25).unwrap();

        let summary = session.summary();
        assert_relative_eq!(summary.total, 2.0);
        assert_relative_eq!(summary.spent, 0.75);
        assert_relative_eq!(summary.remaining, 1.25);
        assert_eq!(summary.cached_queries, 2);
    }

    // -------------------------------------------------------------------------
    // Noise calibration
    // -------------------------------------------------------------------------

    #[test]
    fn test_noise_calibration_across_sessions() {
        let store = Arc::new(movie_store());
        let epsilon = 0.5;
        let true_count = 2.0;
        let n = 10_000;

        let answers: Vec<f64> = (0..n)
            .map(|seed| {
                let mut session = DpQuerySession::with_noise(
                    Arc::clone(&store),
                    1.0,
                    LaplaceNoise::seeded(seed),
                )
                .unwrap();
                session.get_count("Heat", 4, epsilon).unwrap()
            })
            .collect();

        let mean = answers.iter().sum::<f64>() / n as f64;
        let var = answers.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
        let expected_var = 2.0 * (SENSITIVITY / epsilon).powi(2);

        assert!((mean - true_count).abs() < 0.15, "mean {mean}");
        assert!((var - expected_var).abs() < 1.0, "variance {var}");
    }

    // -------------------------------------------------------------------------
    // Shared sessions
    // -------------------------------------------------------------------------

    #[test]
    fn test_shared_session_admits_only_affordable_queries() {
        let session = SharedSession::new(Arc::new(movie_store()), 1.0).unwrap();

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let session = &session;
                    scope.spawn(move || session.get_count("Heat", i, 0.3))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let admitted = results.iter().filter(|r| r.is_ok()).count();
        let refused =
            results.iter().filter(|r| matches!(r, Err(DpError::BudgetDepleted { .. }))).count();

        assert_eq!(admitted, 3);
        assert_eq!(refused, 5);
        let summary = session.summary().unwrap();
        assert!(summary.spent <= summary.total);
        assert_relative_eq!(summary.spent, 0.9, epsilon = 1e-12);
        assert_eq!(summary.cached_queries, 3);
    }

    #[test]
    fn test_shared_session_same_key_charged_once() {
        let session = SharedSession::with_noise(Arc::new(movie_store()), 1.0, LaplaceNoise::seeded(9))
            .unwrap();

        let answers: Vec<f64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..6)
                .map(|_| {
                    let session = &session;
                    scope.spawn(move || session.get_count("Alien", 5, 0.4).unwrap())
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(answers.windows(2).all(|w| w[0] == w[1]));
        assert_relative_eq!(session.remaining_budget().unwrap(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_shared_from_exclusive_keeps_state() {
        let mut session = exact_session(1.0);
        let answer = session.get_count("Heat", 4, 0.25).unwrap();

        let shared = SharedSession::from(session);
        assert_eq!(shared.get_count("Heat", 4, 0.25).unwrap(), answer);
        assert_relative_eq!(shared.remaining_budget().unwrap(), 0.75);
    }
}

// =============================================================================
// Property Tests
// =============================================================================

#[cfg(test)]
mod property_tests {
    use crate::dp::{DpError, DpQuerySession, LaplaceNoise};
    use crate::store::{Rating, RatingStore};
    use proptest::prelude::*;

    fn store() -> RatingStore {
        RatingStore::new(
            (0..20)
                .map(|i| Rating::new(format!("u{i}"), format!("item{}", i % 3), "2020-01-01", i % 5 + 1))
                .collect(),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_spent_equals_sum_of_admitted_distinct_queries(
            total in 0.1f64..5.0,
            queries in prop::collection::vec((0u8..4, 1i64..6, 0.01f64..1.5), 1..40),
            seed in any::<u64>()
        ) {
            let mut session =
                DpQuerySession::with_noise(store(), total, LaplaceNoise::seeded(seed)).unwrap();
            let mut charged = 0.0f64;
            let mut seen = std::collections::HashSet::new();

            for (item, threshold, epsilon) in queries {
                let item = format!("item{item}");
                let fresh = !seen.contains(&(item.clone(), threshold));
                let before = session.remaining_budget();

                match session.get_count(&item, threshold, epsilon) {
                    Ok(_) => {
                        if fresh {
                            charged += epsilon;
                            seen.insert((item, threshold));
                        } else {
                            prop_assert_eq!(session.remaining_budget(), before);
                        }
                    }
                    Err(DpError::BudgetDepleted { .. }) => {
                        prop_assert!(fresh);
                        prop_assert_eq!(session.remaining_budget(), before);
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {e}"),
                }

                let summary = session.summary();
                prop_assert!(summary.spent <= summary.total);
                prop_assert!((summary.spent - charged).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_repeat_returns_identical_answer(
            threshold in -3i64..8,
            first_eps in 0.01f64..1.0,
            second_eps in 0.01f64..10.0
        ) {
            let mut session = DpQuerySession::new(store(), 1.0).unwrap();
            let first = session.get_count("item1", threshold, first_eps).unwrap();
            let remaining = session.remaining_budget();
            let second = session.get_count("item1", threshold, second_eps).unwrap();

            prop_assert_eq!(first, second);
            prop_assert_eq!(session.remaining_budget(), remaining);
        }

        #[test]
        fn prop_non_positive_epsilon_never_mutates(epsilon in -10.0f64..=0.0) {
            let mut session = DpQuerySession::new(store(), 1.0).unwrap();
            let result = session.get_count("item0", 1, epsilon);
            prop_assert!(matches!(result, Err(DpError::InvalidParameter(_))));
            prop_assert_eq!(session.remaining_budget(), 1.0);
            prop_assert_eq!(session.summary().cached_queries, 0);
        }
    }
}
