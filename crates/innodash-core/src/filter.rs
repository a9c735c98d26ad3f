//! # Pipeline Filter
//!
//! Status and customer filters applied to the pipeline table, followed by
//! the completion-score sort.
//!
//! - Status: exact match after lower-casing both sides.
//! - Customer: substring match against the raw customers cell. This is
//!   case-sensitive and matches partial names (`"Acme"` matches
//!   `"Acme Labs"`), the same way the dashboard dropdown always behaved.

use crate::Experiment;
use crate::classify::{CompletionScore, STAGE_ORDER, Stage, StageStatus, completion_score};
use crate::classify::{sort_by_completion, stage_row};
use serde::{Deserialize, Serialize};

/// Values offered by the status dropdown, in display order.
pub const STATUS_FILTER_OPTIONS: [&str; 6] = [
    "Auto Solve",
    "WIP",
    "Hypothesis",
    "Learn",
    "Understand",
    "Unknown",
];

// =============================================================================
// FILTER
// =============================================================================

/// Pipeline filter. `None` or an empty string means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineFilter {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
}

impl PipelineFilter {
    /// A filter that keeps everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep only experiments with this status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Keep only experiments naming this customer.
    #[must_use]
    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    /// Check whether the filter keeps everything.
    #[must_use]
    pub fn is_all(&self) -> bool {
        active(&self.status).is_none() && active(&self.customer).is_none()
    }

    /// Check whether an experiment passes both filters.
    #[must_use]
    pub fn matches(&self, experiment: &Experiment) -> bool {
        let status_match = active(&self.status)
            .is_none_or(|wanted| experiment.status.to_lowercase() == wanted.to_lowercase());
        let customer_match =
            active(&self.customer).is_none_or(|wanted| experiment.customers.contains(wanted));
        status_match && customer_match
    }

    /// Filter experiments, keeping input order.
    #[must_use]
    pub fn apply<'a>(&self, experiments: &'a [Experiment]) -> Vec<&'a Experiment> {
        experiments.iter().filter(|e| self.matches(e)).collect()
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// =============================================================================
// PIPELINE ROWS
// =============================================================================

/// One row of the pipeline table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRow {
    pub title: String,
    pub status: String,
    pub score: CompletionScore,
    /// Completion per stage, in progression order.
    pub stages: [StageStatus; 5],
}

impl PipelineRow {
    /// Classify one experiment into a table row.
    #[must_use]
    pub fn from_experiment(experiment: &Experiment) -> Self {
        Self {
            title: experiment.title.clone(),
            status: experiment.status.clone(),
            score: completion_score(&experiment.status),
            stages: stage_row(&experiment.status),
        }
    }

    /// Get the completion state of one stage.
    #[must_use]
    pub fn stage(&self, stage: Stage) -> StageStatus {
        self.stages[stage.index()]
    }
}

/// Column headers of the pipeline table.
#[must_use]
pub fn pipeline_columns() -> Vec<&'static str> {
    std::iter::once("Opportunity")
        .chain(STAGE_ORDER.iter().map(|s| s.label()))
        .collect()
}

/// Filter, sort most advanced first, and classify.
#[must_use]
pub fn pipeline_rows(experiments: &[Experiment], filter: &PipelineFilter) -> Vec<PipelineRow> {
    let mut kept = filter.apply(experiments);
    sort_by_completion(&mut kept, |e| e.status.as_str());
    kept.into_iter().map(PipelineRow::from_experiment).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Experiment> {
        vec![
            Experiment::new("Routing", "learn").with_customers("Acme Labs, Beta"),
            Experiment::new("Triage", "Auto Solve").with_customers("Beta"),
            Experiment::new("Digest", "wip").with_customers("acme"),
            Experiment::new("Parked", "blocked"),
        ]
    }

    #[test]
    fn empty_filter_keeps_all() {
        let filter = PipelineFilter::all().with_status("").with_customer("");
        assert!(filter.is_all());
        assert_eq!(filter.apply(&sample()).len(), 4);
    }

    #[test]
    fn status_filter_is_case_insensitive_exact() {
        let experiments = sample();
        let kept = PipelineFilter::all().with_status("auto solve").apply(&experiments);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "Triage");

        let none = PipelineFilter::all().with_status("auto").apply(&experiments);
        assert!(none.is_empty());
    }

    #[test]
    fn customer_filter_is_substring_and_case_sensitive() {
        let experiments = sample();
        let kept = PipelineFilter::all().with_customer("Acme").apply(&experiments);
        let titles: Vec<&str> = kept.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Routing"]);
    }

    #[test]
    fn filters_combine() {
        let experiments = sample();
        let kept = PipelineFilter::all()
            .with_status("LEARN")
            .with_customer("Beta")
            .apply(&experiments);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn rows_sorted_most_advanced_first() {
        let rows = pipeline_rows(&sample(), &PipelineFilter::all());
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Triage", "Digest", "Routing", "Parked"]);
        assert_eq!(rows[1].stage(Stage::AutoSolve), StageStatus::Wip);
        assert_eq!(rows[3].stages, [StageStatus::No; 5]);
    }

    #[test]
    fn columns() {
        assert_eq!(
            pipeline_columns(),
            vec!["Opportunity", "Unknown", "Learn", "Understand", "Hypothesis", "Auto Solve"]
        );
    }
}
