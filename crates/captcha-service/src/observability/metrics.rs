//! Metrics definitions for the captcha service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `captcha_` prefix for this service
//! - `_total` suffix for counters
//!
//! # Cardinality
//!
//! Labels are bounded: `outcome` takes 2 values (valid, invalid).

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

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
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

/// Record a generated challenge
///
/// Metric: `captcha_generated_total`
pub fn record_captcha_generated() {
    counter!("captcha_generated_total").increment(1);
}

/// Record a validation attempt
///
/// Metric: `captcha_validations_total`
/// Labels: `outcome` (valid, invalid)
pub fn record_captcha_validation(outcome: &'static str) {
    counter!("captcha_validations_total", "outcome" => outcome).increment(1);
}
