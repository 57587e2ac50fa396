//! Router assembly and application state for the gateway.

use crate::config::Config;
use crate::handlers;
use crate::middleware::{access_filter, http_metrics_middleware};
use crate::proxy;
use axum::{middleware, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across the filter and the forwarder.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration, read-only after startup.
    pub config: Config,

    /// Shared HTTP client for upstream relays.
    pub client: reqwest::Client,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/health` - Liveness probe (simple "OK") - public, unversioned
/// - `/metrics` - Prometheus metrics endpoint - public, unversioned
/// - `/api/*` - Access filter + upstream pass-through
/// - TraceLayer for request logging
/// - 30 second request timeout
/// - HTTP metrics middleware (outermost, captures all responses)
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    // Everything under /api goes through the access filter and ends at the
    // upstream forwarder. Nesting records the original URL so the filter can
    // compute the effective path.
    let api_routes = Router::new()
        .fallback(proxy::forward_to_upstream)
        .layer(middleware::from_fn_with_state(state.clone(), access_filter))
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(metrics_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(middleware::from_fn(http_metrics_middleware))
}
