//! Captcha generation and validation.
//!
//! Challenges are plain text codes drawn from an alphabet without the
//! glyphs readers confuse (`0/O`, `1/I/l`). Validation consumes the stored
//! challenge before comparing, so a wrong answer burns the challenge too.

use crate::errors::CaptchaError;
use crate::models::Captcha;
use crate::observability::metrics::{record_captcha_generated, record_captcha_validation};
use crate::repositories::captchas;
use chrono::{Duration, Utc};
use rand::seq::SliceRandom;
use sqlx::PgPool;
use uuid::Uuid;

/// Challenge alphabet, ambiguous glyphs removed
const CODE_ALPHABET: &[u8] = b"23456789abcdefghjkmnpqrstuvwxyzABCDEFGHJKMNPQRSTUVWXYZ";

/// Generate a challenge for `uuid` and store it with the given lifetime.
///
/// Regenerating for a uuid that already has a live challenge replaces it.
/// Returns the stored challenge; rendering it for humans is the caller's
/// concern.
pub async fn generate(
    pool: &PgPool,
    uuid: Uuid,
    code_length: usize,
    ttl_seconds: u64,
) -> Result<Captcha, CaptchaError> {
    let code = random_code(code_length);
    let expire_time = Utc::now() + Duration::seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX));

    let captcha = captchas::upsert(pool, uuid, &code, expire_time).await?;

    tracing::debug!(target: "captcha_service", uuid = %uuid, "captcha generated");
    record_captcha_generated();

    Ok(captcha)
}

/// Validate `code` against the challenge stored under `uuid`.
///
/// Consumes the stored challenge whether or not the answer matches. True
/// iff a challenge existed, it had not expired, and the codes match
/// ASCII-case-insensitively.
pub async fn validate(pool: &PgPool, uuid: Uuid, code: &str) -> Result<bool, CaptchaError> {
    let stored = captchas::take(pool, uuid).await?;

    let valid = match stored {
        Some(captcha) => captcha.is_live(Utc::now()) && captcha.code.eq_ignore_ascii_case(code),
        None => false,
    };

    tracing::debug!(target: "captcha_service", uuid = %uuid, valid, "captcha validated");
    record_captcha_validation(if valid { "valid" } else { "invalid" });

    Ok(valid)
}

/// Draw a random code from [`CODE_ALPHABET`]
fn random_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .filter_map(|_| CODE_ALPHABET.choose(&mut rng))
        .map(|&b| b as char)
        .collect()
}
