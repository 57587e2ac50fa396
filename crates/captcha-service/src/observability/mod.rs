//! Observability for the captcha service.
//!
//! Challenge codes never appear in logs or metric labels; generation and
//! validation are recorded by outcome only.

pub mod metrics;
