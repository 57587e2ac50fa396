//! API Gateway service library.
//!
//! The gateway sits in front of the platform services. For every request
//! under `/api` it resolves the caller's token (header first, `token` query
//! parameter as fallback), re-attaches it under the configured header name,
//! and relays the request to the configured upstream. Paths matching a
//! configured bypass prefix skip authentication entirely.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `errors` - Error types
//! - `handlers` - Operational HTTP handlers (health, metrics)
//! - `middleware` - Access filter and HTTP metrics layers
//! - `observability` - Metrics definitions
//! - `proxy` - Upstream pass-through forwarding
//! - `routes` - Router assembly and application state

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod proxy;
pub mod routes;
