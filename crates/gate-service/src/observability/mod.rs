//! Observability for the gateway.
//!
//! Structured logging goes through `tracing`; counters and histograms live
//! in the `metrics` submodule. Tokens never appear in logs or metric labels;
//! decisions are recorded by outcome only.

pub mod metrics;
