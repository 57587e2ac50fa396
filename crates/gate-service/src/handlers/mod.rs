//! Operational HTTP handlers.

use axum::extract::State;
use metrics_exporter_prometheus::PrometheusHandle;

/// Liveness probe handler.
///
/// Liveness probes stay simple and do not check dependencies.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Prometheus metrics endpoint.
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_ok() {
        assert_eq!(health_check().await, "OK");
    }
}
