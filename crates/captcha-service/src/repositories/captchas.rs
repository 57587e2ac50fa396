use crate::errors::CaptchaError;
use crate::models::Captcha;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert or replace the challenge stored under `uuid`
pub async fn upsert(
    pool: &PgPool,
    uuid: Uuid,
    code: &str,
    expire_time: DateTime<Utc>,
) -> Result<Captcha, CaptchaError> {
    let captcha = sqlx::query_as::<_, Captcha>(
        r#"
        INSERT INTO captchas (uuid, code, expire_time)
        VALUES ($1, $2, $3)
        ON CONFLICT (uuid)
        DO UPDATE SET code = EXCLUDED.code, expire_time = EXCLUDED.expire_time
        RETURNING uuid, code, expire_time
        "#,
    )
    .bind(uuid)
    .bind(code)
    .bind(expire_time)
    .fetch_one(pool)
    .await
    .map_err(|e| CaptchaError::Database(format!("Failed to store captcha: {}", e)))?;

    Ok(captcha)
}

/// Fetch-and-delete the challenge stored under `uuid`.
///
/// One statement, so concurrent submits for the same uuid cannot both see
/// the row: the challenge is single-use by construction.
pub async fn take(pool: &PgPool, uuid: Uuid) -> Result<Option<Captcha>, CaptchaError> {
    let captcha = sqlx::query_as::<_, Captcha>(
        r#"
        DELETE FROM captchas
        WHERE uuid = $1
        RETURNING uuid, code, expire_time
        "#,
    )
    .bind(uuid)
    .fetch_optional(pool)
    .await
    .map_err(|e| CaptchaError::Database(format!("Failed to take captcha: {}", e)))?;

    Ok(captcha)
}

/// Delete all expired challenges, returning how many were removed
pub async fn purge_expired(pool: &PgPool) -> Result<u64, CaptchaError> {
    let result = sqlx::query(
        r#"
        DELETE FROM captchas
        WHERE expire_time <= NOW()
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| CaptchaError::Database(format!("Failed to purge expired captchas: {}", e)))?;

    Ok(result.rows_affected())
}
