//! Business logic layer.

pub mod captcha_service;
