//! Captcha service library.
//!
//! Issues short-lived text challenges keyed by a caller-supplied uuid and
//! validates submitted answers. Challenges are single-use: validation
//! consumes the stored row whether or not the answer matches. Image
//! rendering is delegated to the frontend layer and is not implemented here.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `models` - Data models
//! - `observability` - Metrics definitions
//! - `repositories` - Database access layer
//! - `services` - Business logic layer

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
