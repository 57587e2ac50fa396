//! Metrics definitions for the gateway.
//!
//! All metrics follow Prometheus naming conventions:
//! - `gate_` prefix for the gateway
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `method`: 7 values max (GET, POST, PATCH, DELETE, PUT, HEAD, OPTIONS)
//! - `endpoint`: first path segment only, since proxied paths are arbitrary
//! - `status`: 5 values (2xx..5xx, error)
//! - `decision`: 3 values (bypassed, forwarded, rejected)

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called before any metrics are recorded.
///
/// # Errors
///
/// Returns error if Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("gate_http_request".to_string()),
            &[
                0.005, 0.010, 0.025, 0.050, 0.100, 0.150, 0.200, 0.300, 0.500, 1.000, 2.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        .set_buckets_for_metric(
            Matcher::Prefix("gate_upstream_request".to_string()),
            &[
                0.010, 0.025, 0.050, 0.100, 0.200, 0.500, 1.000, 2.000, 5.000,
            ],
        )
        .map_err(|e| format!("Failed to set upstream request buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

/// Record HTTP request completion
///
/// Metric: `gate_http_requests_total`, `gate_http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status`
pub fn record_http_request(method: &str, path: &str, status_code: u16, duration: Duration) {
    let endpoint = normalize_endpoint(path);
    let status = categorize_status_code(status_code);

    histogram!("gate_http_request_duration_seconds", "method" => method.to_string(), "endpoint" => endpoint.clone(), "status" => status)
        .record(duration.as_secs_f64());

    counter!("gate_http_requests_total", "method" => method.to_string(), "endpoint" => endpoint, "status" => status)
        .increment(1);
}

/// Record an access filter decision
///
/// Metric: `gate_access_decisions_total`
/// Labels: `decision` (bypassed, forwarded, rejected)
pub fn record_access_decision(decision: &'static str) {
    counter!("gate_access_decisions_total", "decision" => decision).increment(1);
}

/// Record an upstream relay attempt
///
/// Metric: `gate_upstream_requests_total`, `gate_upstream_request_duration_seconds`
/// Labels: `status` (2xx..5xx for completed relays, "error" for transport failures)
pub fn record_upstream_request(status: &'static str, duration: Duration) {
    histogram!("gate_upstream_request_duration_seconds", "status" => status)
        .record(duration.as_secs_f64());

    counter!("gate_upstream_requests_total", "status" => status).increment(1);
}

/// Reduce a proxied path to its first segment so labels stay bounded.
///
/// `/api/orders/42` -> `/api`, `/health` -> `/health`, `/` -> `/`.
fn normalize_endpoint(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    match trimmed.split('/').next() {
        Some("") | None => "/".to_string(),
        Some(first) => format!("/{first}"),
    }
}

/// Collapse a status code into its class label.
pub fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "error",
    }
}
