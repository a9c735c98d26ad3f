//! # Property-Based Tests
//!
//! Verification tests using proptest.
//!
//! These tests ensure the classifier is total, monotonic and order-preserving
//! for arbitrary statuses and inputs.

use innodash_core::{
    CATEGORIES, Experiment, STAGE_ORDER, StageStatus, category, completion_score,
    group_by_category, sort_by_completion, stage_row,
};
use proptest::collection::vec;
use proptest::prelude::*;

/// Known statuses in any letter case, plus arbitrary text.
fn status_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "unknown",
            "learn",
            "understand",
            "hypothesis",
            "auto solve",
            "wip",
        ])
        .prop_flat_map(|s| {
            vec(any::<bool>(), s.len()).prop_map(move |upper| {
                s.chars()
                    .zip(upper)
                    .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
                    .collect::<String>()
            })
        }),
        "[a-zA-Z ]{0,12}",
    ]
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Once a stage reports `no`, every later stage reports `no` too.
    #[test]
    fn stage_row_is_monotonic(status in status_strategy()) {
        let row = stage_row(&status);
        let first_no = row.iter().position(|s| *s == StageStatus::No);
        if let Some(i) = first_no {
            prop_assert!(row[i..].iter().all(|s| *s == StageStatus::No));
        }
        // `wip` only ever appears in the last column.
        prop_assert!(row[..4].iter().all(|s| *s != StageStatus::Wip));
    }

    /// Classification does not depend on letter case.
    #[test]
    fn classification_ignores_case(status in status_strategy()) {
        let upper = status.to_uppercase();
        prop_assert_eq!(stage_row(&status), stage_row(&upper));
        prop_assert_eq!(category(&status), category(&upper));
        prop_assert_eq!(completion_score(&status), completion_score(&upper));
    }

    /// A status with no category scores zero and completes no stage.
    #[test]
    fn unclassified_means_no_progress(status in status_strategy()) {
        if category(&status).is_none() {
            prop_assert_eq!(completion_score(&status).half_points(), 0);
            prop_assert_eq!(stage_row(&status), [StageStatus::No; 5]);
        }
    }

    /// A higher score never completes fewer stages.
    #[test]
    fn score_agrees_with_stage_count(a in status_strategy(), b in status_strategy()) {
        let done = |s: &str| stage_row(s).iter().filter(|x| **x == StageStatus::Yes).count();
        if completion_score(&a) > completion_score(&b) {
            prop_assert!(done(&a) >= done(&b));
        }
    }

    /// Grouping keeps every classified experiment exactly once, in input order.
    #[test]
    fn grouping_is_a_partition(statuses in vec(status_strategy(), 0..40)) {
        let experiments: Vec<Experiment> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| Experiment::new(i.to_string(), s.clone()))
            .collect();
        let groups = group_by_category(&experiments);

        prop_assert_eq!(groups.len(), CATEGORIES.len());

        let classified = experiments.iter().filter(|e| category(&e.status).is_some()).count();
        let grouped: usize = groups.values().map(Vec::len).sum();
        prop_assert_eq!(classified, grouped);

        for members in groups.values() {
            let positions: Vec<usize> = members
                .iter()
                .filter_map(|e| e.title.parse::<usize>().ok())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    /// Sorting is descending by score and stable among equal scores.
    #[test]
    fn sort_is_stable_descending(statuses in vec(status_strategy(), 0..40)) {
        let mut experiments: Vec<Experiment> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| Experiment::new(i.to_string(), s.clone()))
            .collect();
        sort_by_completion(&mut experiments, |e| e.status.as_str());

        for pair in experiments.windows(2) {
            let (left, right) = (completion_score(&pair[0].status), completion_score(&pair[1].status));
            prop_assert!(left >= right);
            if left == right {
                let l: usize = pair[0].title.parse().unwrap_or(0);
                let r: usize = pair[1].title.parse().unwrap_or(0);
                prop_assert!(l < r);
            }
        }
    }
}

#[test]
fn stage_order_is_progression_order() {
    let names: Vec<&str> = STAGE_ORDER.iter().map(|s| s.status_name()).collect();
    assert_eq!(
        names,
        vec!["unknown", "learn", "understand", "hypothesis", "auto solve"]
    );
}
