//! # Innovation Dashboard HTTP API
//!
//! Serves the dashboard sections as JSON using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /dashboard` - Every section (`?status=&customer=` filters the pipeline)
//! - `GET /pipeline` - Pipeline table (`?status=&customer=`)
//! - `GET /stack` - Stack buckets
//! - `GET /customers` - Customer-use table
//! - `GET /usage` - Usage summary
//! - `GET /artifacts` - Knowledge-sharing feed
//! - `GET /experiments/{title}` - Experiment detail (404 when absent)
//! - `GET /classify?status=` - Classify a single status
//! - `POST /refresh` - Re-fetch the data source
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `INNODASH_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `INNODASH_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)
//! - `INNODASH_API_KEY`: If set, `POST /refresh` requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::get_api_key_from_env;
pub use middleware::{create_rate_limiter, get_rate_limit_from_env};
pub use types::{
    ClassifyQuery, ClassifyResponse, ErrorResponse, HealthResponse, PipelineQuery,
    RefreshResponse, UsageResponse,
};

use crate::source::DataSource;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use innodash_core::{DashboardError, SheetData};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Request body limit. Only `POST /refresh` accepts a request, and it has no body.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the loaded sheets and where they came from.
#[derive(Clone)]
pub struct AppState {
    /// The sheets every view is derived from.
    pub sheets: Arc<RwLock<SheetData>>,
    /// Source re-read by `POST /refresh`.
    pub source: Option<DataSource>,
}

impl AppState {
    /// Create state over already loaded sheets, without a source.
    #[must_use]
    pub fn new(sheets: SheetData) -> Self {
        Self {
            sheets: Arc::new(RwLock::new(sheets)),
            source: None,
        }
    }

    /// Attach the source used by `POST /refresh`.
    #[must_use]
    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = Some(source);
        self
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from `INNODASH_CORS_ORIGINS`.
///
/// - `*`: allow all origins
/// - unset: localhost only
/// - otherwise: the comma-separated origins that parse
fn build_cors_layer() -> CorsLayer {
    match std::env::var("INNODASH_CORS_ORIGINS").ok().as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (INNODASH_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(hv) => {
                        tracing::info!("CORS: Allowing origin: {}", origin);
                        Some(hv)
                    }
                    Err(e) => {
                        tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                        None
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in INNODASH_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                restricted_cors(allowed_origins)
            }
        }
        None => {
            tracing::info!("CORS: No INNODASH_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build a CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
    .collect();

    restricted_cors(origins)
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting - if enabled
/// 5. Authentication - `POST /refresh` only, if a key is configured
pub fn create_router(state: AppState) -> Router {
    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let mut refresh = Router::new().route("/refresh", post(handlers::refresh_handler));
    if get_api_key_from_env().is_some() {
        tracing::info!("API key authentication enabled for POST /refresh");
        refresh = refresh.route_layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    } else {
        tracing::warn!(
            "API key authentication DISABLED - POST /refresh is publicly accessible. \
             Set INNODASH_API_KEY to require a key."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/dashboard", get(handlers::dashboard_handler))
        .route("/pipeline", get(handlers::pipeline_handler))
        .route("/stack", get(handlers::stack_handler))
        .route("/customers", get(handlers::customers_handler))
        .route("/usage", get(handlers::usage_handler))
        .route("/artifacts", get(handlers::artifacts_handler))
        .route("/experiments/{title}", get(handlers::experiment_handler))
        .route("/classify", get(handlers::classify_handler))
        .merge(refresh);

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer())
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and serve until Ctrl+C.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), DashboardError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| DashboardError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Innovation Dashboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DashboardError::Io(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
