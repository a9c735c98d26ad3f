//! # Core Type Definitions
//!
//! This module contains the row types read from the spreadsheet export:
//! - Experiment rows (`Experiment`)
//! - Metric rows (`MetricRow`)
//! - Knowledge artifact rows (`ArtifactRow`)
//! - The four-sheet bundle handed over by the fetch layer (`SheetData`)
//! - Error types (`DashboardError`)
//!
//! ## Leniency Guarantees
//!
//! Rows come from a spreadsheet, so any cell may be missing, empty, a string
//! or a number. Every field deserializes to a `String`:
//! - missing or `null` cells become `""`
//! - numbers become their decimal text (`3` → `"3"`)
//! - booleans become `"true"` / `"false"`
//!
//! Deserialization of a row therefore never fails on cell content.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// =============================================================================
// CELL DESERIALIZATION
// =============================================================================

/// Deserialize any scalar spreadsheet cell into its text form.
pub fn cell_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CellVisitor)
}

struct CellVisitor;

impl<'de> Visitor<'de> for CellVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null cell")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        // f64 Display drops a zero fraction: 45000.0 -> "45000"
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(CellVisitor)
    }
}

// =============================================================================
// EXPERIMENT
// =============================================================================

/// One row of the experiments sheet.
///
/// Experiments are read-only: every view (pipeline, stack, usage table)
/// is derived from them without mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    #[serde(default, deserialize_with = "cell_text")]
    pub title: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub description: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub success_function: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub usage_data: String,
    /// Comma-separated customer names.
    #[serde(default, deserialize_with = "cell_text")]
    pub customers: String,
    /// Free-text status, classified by [`crate::classify`].
    #[serde(default, deserialize_with = "cell_text")]
    pub status: String,
    /// Newline-delimited learnings; lines may start with `-`.
    #[serde(default, deserialize_with = "cell_text")]
    pub learnings: String,
}

impl Experiment {
    /// Create an experiment with a title and status, all other fields empty.
    #[must_use]
    pub fn new(title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: status.into(),
            ..Self::default()
        }
    }

    /// Set the customers field.
    #[must_use]
    pub fn with_customers(mut self, customers: impl Into<String>) -> Self {
        self.customers = customers.into();
        self
    }

    /// Set the usage data field.
    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage_data = usage.into();
        self
    }

    /// Set the learnings field.
    #[must_use]
    pub fn with_learnings(mut self, learnings: impl Into<String>) -> Self {
        self.learnings = learnings.into();
        self
    }

    /// Split the learnings text into items.
    ///
    /// Blank lines are skipped and a leading `-` bullet is stripped.
    #[must_use]
    pub fn learning_items(&self) -> Vec<&str> {
        self.learnings
            .lines()
            .map(str::trim)
            .map(|line| line.strip_prefix('-').map(str::trim_start).unwrap_or(line))
            .filter(|line| !line.is_empty())
            .collect()
    }
}

// =============================================================================
// METRIC ROW
// =============================================================================

/// One row of the metrics sheet, keyed by `metric`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRow {
    #[serde(default, deserialize_with = "cell_text")]
    pub metric: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub target: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub current: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub last_week: String,
}

impl MetricRow {
    /// Create a metric row from its text cells.
    #[must_use]
    pub fn new(
        metric: impl Into<String>,
        target: impl Into<String>,
        current: impl Into<String>,
        last_week: impl Into<String>,
    ) -> Self {
        Self {
            metric: metric.into(),
            target: target.into(),
            current: current.into(),
            last_week: last_week.into(),
        }
    }
}

// =============================================================================
// ARTIFACT ROW
// =============================================================================

/// One row of the knowledge artifacts sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRow {
    #[serde(rename = "type", default, deserialize_with = "cell_text")]
    pub kind: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub title: String,
    /// ISO date text or an Excel serial day number.
    #[serde(default, deserialize_with = "cell_text")]
    pub date: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub channel: String,
    #[serde(default, deserialize_with = "cell_text")]
    pub link: String,
}

/// A scalar cell kept in its text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Cell(pub String);

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        cell_text(deserializer).map(Cell)
    }
}

impl Cell {
    /// Get the cell text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An opportunities row. The pipeline is derived from experiments, so these
/// rows are carried through to API consumers without interpretation.
pub type OpportunityRow = BTreeMap<String, Cell>;

// =============================================================================
// SHEET DATA
// =============================================================================

/// The four sheets handed over by the fetch layer.
///
/// The empty value is a valid, fully supported input: every view renders
/// its empty state from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetData {
    #[serde(default)]
    pub metrics: Vec<MetricRow>,
    #[serde(default)]
    pub experiments: Vec<Experiment>,
    #[serde(default)]
    pub opportunities: Vec<OpportunityRow>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactRow>,
}

impl SheetData {
    /// Create an empty bundle.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a bundle holding only experiments.
    #[must_use]
    pub fn with_experiments(experiments: Vec<Experiment>) -> Self {
        Self {
            experiments,
            ..Self::default()
        }
    }

    /// Check whether all four sheets are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
            && self.experiments.is_empty()
            && self.opportunities.is_empty()
            && self.artifacts.is_empty()
    }

    /// Find an experiment by title (case-insensitive, first match).
    #[must_use]
    pub fn find_experiment(&self, title: &str) -> Option<&Experiment> {
        let wanted = title.trim().to_lowercase();
        self.experiments
            .iter()
            .find(|e| e.title.trim().to_lowercase() == wanted)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur around the dashboard engine.
///
/// The classifier itself is infallible: an unrecognized status is "no
/// progress", never an error. These variants cover the layers around it
/// (loading the export, reading configuration, looking rows up).
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The data source could not be reached or returned a failure status.
    #[error("Source unavailable: {0}")]
    Source(String),

    /// The data source returned a payload that is not a sheet export.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// The configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A requested row does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

// =============================================================================
// TESTS
// =============================================================================
