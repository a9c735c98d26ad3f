//! # API Endpoint Handlers
//!
//! Every read handler derives its view fresh from the current sheets under a
//! read lock. Only `POST /refresh` takes the write lock.

use super::{
    AppState,
    types::{
        ClassifyQuery, ClassifyResponse, ErrorResponse, HealthResponse, PipelineQuery,
        RefreshResponse, UsageResponse,
    },
};
use crate::source::load_sheets_strict;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use innodash_core::{
    CustomerUseView, DashboardView, ExperimentDetail, KnowledgeView, PipelineView, stack_buckets,
};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// VIEW HANDLERS
// =============================================================================

/// Get every dashboard section.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<PipelineQuery>,
) -> impl IntoResponse {
    let sheets = state.sheets.read().await;
    Json(DashboardView::build(&sheets, &query.to_filter()))
}

/// Get the pipeline table, optionally filtered.
pub async fn pipeline_handler(
    State(state): State<AppState>,
    Query(query): Query<PipelineQuery>,
) -> impl IntoResponse {
    let sheets = state.sheets.read().await;
    Json(PipelineView::build(&sheets.experiments, &query.to_filter()))
}

/// Get the stack buckets.
pub async fn stack_handler(State(state): State<AppState>) -> impl IntoResponse {
    let sheets = state.sheets.read().await;
    Json(stack_buckets(&sheets.experiments))
}

/// Get the customer-use table.
pub async fn customers_handler(State(state): State<AppState>) -> impl IntoResponse {
    let sheets = state.sheets.read().await;
    Json(CustomerUseView::build(&sheets.experiments))
}

/// Get the usage summary.
pub async fn usage_handler(State(state): State<AppState>) -> impl IntoResponse {
    let sheets = state.sheets.read().await;
    Json(UsageResponse::from_experiments(&sheets.experiments))
}

/// Get the knowledge-sharing feed.
pub async fn artifacts_handler(State(state): State<AppState>) -> impl IntoResponse {
    let sheets = state.sheets.read().await;
    Json(KnowledgeView::build(&sheets))
}

/// Get the detail view of one experiment by title.
pub async fn experiment_handler(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Response {
    let sheets = state.sheets.read().await;
    match sheets.find_experiment(&title) {
        Some(experiment) => Json(ExperimentDetail::from_experiment(experiment)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Experiment not found: {title}"))),
        )
            .into_response(),
    }
}

/// Classify a status without touching the sheets.
pub async fn classify_handler(Query(query): Query<ClassifyQuery>) -> impl IntoResponse {
    Json(ClassifyResponse::from_status(&query.status))
}

// =============================================================================
// REFRESH HANDLER
// =============================================================================

/// Re-fetch the sheets from the configured source.
///
/// On failure the previously loaded sheets stay in place.
pub async fn refresh_handler(State(state): State<AppState>) -> impl IntoResponse {
    let Some(source) = state.source.as_ref() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(RefreshResponse::error("No data source configured")),
        );
    };

    match load_sheets_strict(source).await {
        Ok(data) => {
            let count = data.experiments.len();
            *state.sheets.write().await = data;
            tracing::info!(source = %source, experiments = count, "Sheets refreshed");
            (StatusCode::OK, Json(RefreshResponse::success(count)))
        }
        Err(e) => {
            tracing::error!(source = %source, "Refresh failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(RefreshResponse::error(format!("Refresh failed: {e}"))),
            )
        }
    }
}
