//! # Dashboard View Assembly
//!
//! Builds every dashboard section from one [`SheetData`] bundle. The result
//! is a plain serializable value; the CLI renders it as text and the HTTP
//! API returns it as JSON.
//!
//! Views are derived fresh on every call. Nothing here caches or mutates
//! the rows.

use crate::artifact::ArtifactEntry;
use crate::badge::StatusBadge;
use crate::classify::{CATEGORIES, Category, group_by_category, stage_progression};
use crate::filter::{PipelineFilter, PipelineRow, STATUS_FILTER_OPTIONS, pipeline_rows};
use crate::metrics::{KnowledgeSharing, MetricCard, MetricTable, metric_cards};
use crate::usage::{customer_set, with_usage};
use crate::{Experiment, SheetData};
use serde::{Deserialize, Serialize};

/// Heading of the rendered dashboard.
pub const DASHBOARD_TITLE: &str = "Innovation Dashboard";

// =============================================================================
// SECTIONS
// =============================================================================

/// The pipeline ("pancake chart") section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineView {
    pub rows: Vec<PipelineRow>,
    /// Options of the status dropdown.
    pub status_options: Vec<String>,
    /// Options of the customer dropdown, sorted and distinct.
    pub customer_options: Vec<String>,
    /// The filter the rows were built with.
    pub filter: PipelineFilter,
}

impl PipelineView {
    /// Build the pipeline section.
    #[must_use]
    pub fn build(experiments: &[Experiment], filter: &PipelineFilter) -> Self {
        Self {
            rows: pipeline_rows(experiments, filter),
            status_options: STATUS_FILTER_OPTIONS.iter().map(|s| s.to_string()).collect(),
            customer_options: customer_set(experiments).into_iter().collect(),
            filter: filter.clone(),
        }
    }
}

/// One bucket of the stack section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackBucket {
    pub category: Category,
    pub id: String,
    pub label: String,
    /// Titles of the experiments in this bucket, in input order.
    pub titles: Vec<String>,
}

/// Build the stack section: all five buckets, in table order.
#[must_use]
pub fn stack_buckets(experiments: &[Experiment]) -> Vec<StackBucket> {
    let groups = group_by_category(experiments);
    CATEGORIES
        .iter()
        .map(|def| StackBucket {
            category: def.category,
            id: def.id.to_string(),
            label: def.label.to_string(),
            titles: groups
                .get(&def.category)
                .map(|members| members.iter().map(|e| e.title.clone()).collect())
                .unwrap_or_default(),
        })
        .collect()
}

/// One row of the customer-use table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUseRow {
    pub title: String,
    pub customers: String,
    pub usage_data: String,
    pub badge: StatusBadge,
}

/// The customer-use section: experiments with usage data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUseView {
    pub total: usize,
    pub rows: Vec<CustomerUseRow>,
}

impl CustomerUseView {
    /// Build the customer-use section.
    #[must_use]
    pub fn build(experiments: &[Experiment]) -> Self {
        let rows: Vec<CustomerUseRow> = with_usage(experiments)
            .into_iter()
            .map(|e| CustomerUseRow {
                title: e.title.clone(),
                customers: e.customers.clone(),
                usage_data: e.usage_data.clone(),
                badge: StatusBadge::from_status(&e.status),
            })
            .collect();
        Self {
            total: rows.len(),
            rows,
        }
    }
}

/// The knowledge-sharing feed section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeView {
    /// Progress from the metrics sheet; the header reads `<count> of <target>`.
    pub progress: KnowledgeSharing,
    pub count: usize,
    pub entries: Vec<ArtifactEntry>,
}

impl KnowledgeView {
    /// Build the knowledge-sharing section from the metrics and artifacts sheets.
    #[must_use]
    pub fn build(data: &SheetData) -> Self {
        let entries: Vec<ArtifactEntry> = data.artifacts.iter().map(ArtifactEntry::from_row).collect();
        Self {
            progress: MetricTable::from_rows(&data.metrics).knowledge_sharing(),
            count: entries.len(),
            entries,
        }
    }
}

// =============================================================================
// DASHBOARD VIEW
// =============================================================================

/// Every section of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub title: String,
    pub metrics: Vec<MetricCard>,
    pub pipeline: PipelineView,
    pub stack: Vec<StackBucket>,
    pub customer_use: CustomerUseView,
    pub knowledge: KnowledgeView,
}

impl DashboardView {
    /// Assemble the dashboard from the fetched sheets.
    #[must_use]
    pub fn build(data: &SheetData, filter: &PipelineFilter) -> Self {
        let table = MetricTable::from_rows(&data.metrics);

        Self {
            title: DASHBOARD_TITLE.to_string(),
            metrics: metric_cards(&table, &data.experiments),
            pipeline: PipelineView::build(&data.experiments, filter),
            stack: stack_buckets(&data.experiments),
            customer_use: CustomerUseView::build(&data.experiments),
            knowledge: KnowledgeView::build(data),
        }
    }
}

// =============================================================================
// EXPERIMENT DETAIL
// =============================================================================

/// Detail view of one experiment. Empty fields read `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentDetail {
    pub title: String,
    pub badge: StatusBadge,
    pub description: String,
    pub success_function: String,
    pub usage_data: String,
    pub customers: String,
    pub learnings: Vec<String>,
    pub category: Option<Category>,
    pub stage_progression: String,
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

impl ExperimentDetail {
    /// Build the detail view of an experiment.
    #[must_use]
    pub fn from_experiment(experiment: &Experiment) -> Self {
        Self {
            title: if experiment.title.is_empty() {
                "Experiment".to_string()
            } else {
                experiment.title.clone()
            },
            badge: StatusBadge::from_status(&experiment.status),
            description: or_dash(&experiment.description),
            success_function: or_dash(&experiment.success_function),
            usage_data: or_dash(&experiment.usage_data),
            customers: or_dash(&experiment.customers),
            learnings: experiment
                .learning_items()
                .into_iter()
                .map(str::to_string)
                .collect(),
            category: crate::classify::category(&experiment.status),
            stage_progression: stage_progression(&experiment.status),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArtifactRow, MetricRow};

    fn sheets() -> SheetData {
        SheetData {
            metrics: vec![MetricRow::new("knowledgeSharing", "12", "3", "")],
            experiments: vec![
                Experiment::new("Routing", "learn")
                    .with_customers("Acme, Beta")
                    .with_usage("2 teams"),
                Experiment::new("Triage", "auto solve").with_customers("Beta"),
                Experiment::new("Parked", "blocked").with_usage("0"),
            ],
            opportunities: Vec::new(),
            artifacts: vec![ArtifactRow {
                kind: "blog".to_string(),
                title: "What we learned".to_string(),
                date: "45748".to_string(),
                channel: "blog".to_string(),
                link: String::new(),
            }],
        }
    }

    #[test]
    fn empty_sheets_render_empty_sections() {
        let view = DashboardView::build(&SheetData::empty(), &PipelineFilter::all());
        assert_eq!(view.title, DASHBOARD_TITLE);
        assert_eq!(view.metrics.len(), 5);
        assert!(view.pipeline.rows.is_empty());
        assert!(view.pipeline.customer_options.is_empty());
        assert_eq!(view.stack.len(), 5);
        assert!(view.stack.iter().all(|b| b.titles.is_empty()));
        assert_eq!(view.customer_use.total, 0);
        assert_eq!(view.knowledge.count, 0);
    }

    #[test]
    fn sections_from_sheets() {
        let view = DashboardView::build(&sheets(), &PipelineFilter::all());

        assert_eq!(view.pipeline.rows[0].title, "Triage");
        assert_eq!(view.pipeline.customer_options, vec!["Acme", "Beta"]);
        assert_eq!(view.pipeline.status_options.len(), 6);

        let stacked: usize = view.stack.iter().map(|b| b.titles.len()).sum();
        assert_eq!(stacked, 2, "blocked experiment is not stacked");
        assert_eq!(view.pipeline.rows.len(), 3, "blocked experiment is still in the pipeline");

        assert_eq!(view.customer_use.total, 1);
        assert_eq!(view.customer_use.rows[0].badge.text, "🔄 learn");

        assert_eq!(view.knowledge.progress.target, 12);
        assert_eq!(view.knowledge.entries[0].date, "Apr 1, 2025");
    }

    #[test]
    fn filter_reaches_pipeline_only() {
        let filter = PipelineFilter::all().with_customer("Acme");
        let view = DashboardView::build(&sheets(), &filter);
        assert_eq!(view.pipeline.rows.len(), 1);
        assert_eq!(view.pipeline.customer_options.len(), 2);
        assert_eq!(view.customer_use.total, 1);
    }

    #[test]
    fn detail_fills_dashes() {
        let experiment = Experiment::new("", "wip").with_learnings("- one\n- two");
        let detail = ExperimentDetail::from_experiment(&experiment);
        assert_eq!(detail.title, "Experiment");
        assert_eq!(detail.description, "-");
        assert_eq!(detail.learnings, vec!["one", "two"]);
        assert_eq!(detail.category, Some(Category::AutoTriggerAutoSolve));
        assert!(detail.stage_progression.ends_with("🔵 Auto Solve"));
    }
}
