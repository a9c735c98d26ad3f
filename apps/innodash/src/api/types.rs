//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API. Dashboard
//! sections are served as the view types of `innodash-core`; the types here
//! cover everything else.

use innodash_core::{
    Category, CompletionScore, Experiment, PipelineFilter, StageStatus, StatusBadge, category,
    completion_score, stage_progression, stage_row,
    usage::{customer_set, customer_use_count},
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// PIPELINE QUERY
// =============================================================================

/// Query string of `GET /pipeline` and `GET /dashboard`.
///
/// Absent or empty parameters mean "all".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineQuery {
    pub status: Option<String>,
    pub customer: Option<String>,
}

impl PipelineQuery {
    /// Convert to a pipeline filter.
    #[must_use]
    pub fn to_filter(&self) -> PipelineFilter {
        let mut filter = PipelineFilter::all();
        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            filter = filter.with_status(status);
        }
        if let Some(customer) = self.customer.as_deref().filter(|c| !c.is_empty()) {
            filter = filter.with_customer(customer);
        }
        filter
    }
}

// =============================================================================
// CLASSIFY REQUEST/RESPONSE
// =============================================================================

/// Query string of `GET /classify`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyQuery {
    #[serde(default)]
    pub status: String,
}

/// Everything the classifier derives from one status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub status: String,
    /// Completion per stage, in progression order.
    pub stages: [StageStatus; 5],
    pub category: Option<Category>,
    pub category_label: Option<String>,
    pub score: CompletionScore,
    pub progression: String,
    pub badge: StatusBadge,
}

impl ClassifyResponse {
    /// Classify a status.
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        let bucket = category(status);
        Self {
            status: status.to_string(),
            stages: stage_row(status),
            category: bucket,
            category_label: bucket.map(|c| c.label().to_string()),
            score: completion_score(status),
            progression: stage_progression(status),
            badge: StatusBadge::from_status(status),
        }
    }
}

// =============================================================================
// USAGE RESPONSE
// =============================================================================

/// Usage summary across all experiments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageResponse {
    pub experiment_count: usize,
    /// Experiments whose usage data is present.
    pub with_usage: usize,
    /// Distinct customer names, sorted.
    pub customers: Vec<String>,
}

impl UsageResponse {
    /// Summarize usage over experiments.
    #[must_use]
    pub fn from_experiments(experiments: &[Experiment]) -> Self {
        Self {
            experiment_count: experiments.len(),
            with_usage: customer_use_count(experiments),
            customers: customer_set(experiments).into_iter().collect(),
        }
    }
}

// =============================================================================
// REFRESH RESPONSE
// =============================================================================

/// Result of `POST /refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub experiments: usize,
    pub error: Option<String>,
}

impl RefreshResponse {
    /// Create a success response.
    #[must_use]
    pub fn success(experiments: usize) -> Self {
        Self {
            success: true,
            experiments,
            error: None,
        }
    }

    /// Create an error response.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            experiments: 0,
            error: Some(message.into()),
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Body of a 4xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
