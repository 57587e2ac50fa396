use crate::config::Config;
use crate::errors::CaptchaError;
use crate::services::captcha_service;
use axum::{
    extract::{Query, State},
    Json,
};
use common::envelope::DataEnvelope;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}

#[derive(Debug, Deserialize)]
pub struct CaptchaParams {
    /// Caller-supplied challenge key
    pub uuid: String,
}

#[derive(Debug, Serialize)]
pub struct CaptchaChallenge {
    pub uuid: Uuid,
    /// Text challenge; rendering is the frontend's concern
    pub captcha: String,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub uuid: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

/// Issue a challenge for the given uuid
///
/// GET /api/v1/captcha?uuid=<uuid>
pub async fn get_captcha(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CaptchaParams>,
) -> Result<Json<DataEnvelope<CaptchaChallenge>>, CaptchaError> {
    let uuid = parse_uuid(&params.uuid)?;

    let captcha = captcha_service::generate(
        &state.pool,
        uuid,
        state.config.captcha_code_length,
        state.config.captcha_ttl_seconds,
    )
    .await?;

    Ok(Json(DataEnvelope::ok(CaptchaChallenge {
        uuid: captcha.uuid,
        captcha: captcha.code,
        expires_in: state.config.captcha_ttl_seconds,
    })))
}

/// Validate a submitted answer
///
/// POST /api/v1/captcha/validate
pub async fn validate_captcha(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ValidateRequest>,
) -> Result<Json<DataEnvelope<ValidateResponse>>, CaptchaError> {
    let uuid = parse_uuid(&payload.uuid)?;

    let valid = captcha_service::validate(&state.pool, uuid, &payload.code).await?;

    Ok(Json(DataEnvelope::ok(ValidateResponse { valid })))
}

fn parse_uuid(raw: &str) -> Result<Uuid, CaptchaError> {
    Uuid::parse_str(raw).map_err(|_| CaptchaError::InvalidUuid(raw.to_string()))
}
