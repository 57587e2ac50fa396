//! Database access layer.

pub mod captchas;
