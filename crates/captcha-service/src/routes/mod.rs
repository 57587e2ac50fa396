//! HTTP routes for the captcha service.

use crate::handlers::{self, captcha_handler};
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/api/v1/captcha` - Issue a challenge for a uuid
/// - `/api/v1/captcha/validate` - Validate a submitted answer
/// - `/health` - Liveness probe (simple "OK") - public, unversioned
/// - `/metrics` - Prometheus metrics endpoint - public, unversioned
/// - TraceLayer for request logging
/// - 30 second request timeout
pub fn build_routes(
    state: Arc<captcha_handler::AppState>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/captcha", get(captcha_handler::get_captcha))
        .route(
            "/api/v1/captcha/validate",
            post(captcha_handler::validate_captcha),
        )
        .route("/health", get(handlers::health_check))
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    api_routes
        .merge(metrics_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
