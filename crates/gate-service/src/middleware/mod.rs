//! Middleware layers for the gateway.

pub mod access;
pub mod http_metrics;

pub use access::access_filter;
pub use http_metrics::http_metrics_middleware;
