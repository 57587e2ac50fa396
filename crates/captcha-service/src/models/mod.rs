//! Data models for the captcha service.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored captcha challenge.
///
/// One row per caller-supplied uuid; regeneration replaces the row and
/// validation deletes it.
#[derive(Debug, Clone, FromRow)]
pub struct Captcha {
    pub uuid: Uuid,
    /// Challenge answer, compared ASCII-case-insensitively
    pub code: String,
    /// Instant after which the challenge no longer validates
    pub expire_time: DateTime<Utc>,
}

impl Captcha {
    /// True when the challenge can still be answered
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expire_time > now
    }
}
