//! # innodash-core
//!
//! The deterministic engine of the Innovation Dashboard - THE LOGIC.
//!
//! This crate turns the rows of a spreadsheet export (experiments, metrics,
//! knowledge artifacts) into dashboard views. The heart of it is the Stage
//! Classifier, which maps a free-text experiment status onto a fixed
//! progression:
//!
//! ```text
//! unknown → learn → understand → hypothesis → (wip) → auto solve
//! ```
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Is pure: no async, no network, no I/O
//! - Is lenient: an unrecognized status is "no progress", a missing cell is
//!   empty; neither is an error
//! - Is deterministic: static lookup tables, `BTreeMap`/`BTreeSet`,
//!   integer scores, stable sorts
//! - Holds no state: every view is derived fresh from immutable rows

// =============================================================================
// MODULES
// =============================================================================

pub mod artifact;
pub mod badge;
pub mod classify;
pub mod dashboard;
pub mod filter;
pub mod metrics;
pub mod types;
pub mod usage;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ArtifactRow, Cell, DashboardError, Experiment, MetricRow, OpportunityRow, SheetData,
};

// =============================================================================
// RE-EXPORTS: Classifier
// =============================================================================

pub use classify::{
    CATEGORIES, Category, CategoryDef, CompletionScore, STAGE_ORDER, Stage, StageStatus,
    category, completion_score, group_by_category, sort_by_completion, stage_progression,
    stage_row, stage_status,
};

// =============================================================================
// RE-EXPORTS: Views
// =============================================================================

pub use artifact::{ArtifactEntry, format_date};
pub use badge::{BadgeKind, StatusBadge};
pub use dashboard::{
    CustomerUseView, DashboardView, ExperimentDetail, KnowledgeView, PipelineView, StackBucket,
    stack_buckets,
};
pub use filter::{PipelineFilter, PipelineRow, STATUS_FILTER_OPTIONS, pipeline_rows};
pub use metrics::{MetricCard, MetricSnapshot, MetricTable};
pub use usage::{customer_set, has_usage_data};
