//! # Usage and Customer Helpers
//!
//! - A usage-data cell counts as present unless it is blank or the literal `0`.
//! - Customer cells are comma-separated; names are trimmed, deduplicated and
//!   sorted for display.

use crate::Experiment;
use std::collections::BTreeSet;

/// Check whether a usage-data cell carries a meaningful value.
#[must_use]
pub fn has_usage_data(usage_data: &str) -> bool {
    let trimmed = usage_data.trim().to_lowercase();
    !trimmed.is_empty() && trimmed != "0"
}

/// Split one customers cell into trimmed, non-empty names.
pub fn split_customers(customers: &str) -> impl Iterator<Item = &str> {
    customers
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// Collect the distinct customer names across experiments, sorted.
#[must_use]
pub fn customer_set(experiments: &[Experiment]) -> BTreeSet<String> {
    experiments
        .iter()
        .flat_map(|e| split_customers(&e.customers))
        .map(str::to_string)
        .collect()
}

/// Experiments with usage data, in input order.
#[must_use]
pub fn with_usage(experiments: &[Experiment]) -> Vec<&Experiment> {
    experiments
        .iter()
        .filter(|e| has_usage_data(&e.usage_data))
        .collect()
}

/// Count the experiments with usage data.
#[must_use]
pub fn customer_use_count(experiments: &[Experiment]) -> usize {
    experiments
        .iter()
        .filter(|e| has_usage_data(&e.usage_data))
        .count()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_presence() {
        assert!(!has_usage_data(""));
        assert!(!has_usage_data("   "));
        assert!(!has_usage_data("0"));
        assert!(!has_usage_data(" 0 "));
        assert!(has_usage_data("3 customers"));
        assert!(has_usage_data("00"));
    }

    #[test]
    fn customer_names_trimmed_distinct_sorted() {
        let experiments = vec![
            Experiment::new("a", "learn").with_customers("Zeta, Acme"),
            Experiment::new("b", "wip").with_customers(" Acme ,, Beta"),
            Experiment::new("c", "wip"),
        ];
        let names: Vec<String> = customer_set(&experiments).into_iter().collect();
        assert_eq!(names, vec!["Acme", "Beta", "Zeta"]);
    }

    #[test]
    fn usage_filter_keeps_order() {
        let experiments = vec![
            Experiment::new("a", "learn").with_usage("2 teams"),
            Experiment::new("b", "learn").with_usage("0"),
            Experiment::new("c", "learn").with_usage("weekly"),
        ];
        let titles: Vec<&str> = with_usage(&experiments)
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(customer_use_count(&experiments), 2);
    }
}
