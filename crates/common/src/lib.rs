//! Common types shared across edge gateway components.

#![warn(clippy::pedantic)]

/// Module for the platform response envelope
pub mod envelope;

/// Module for request-scoped access context
pub mod context;
