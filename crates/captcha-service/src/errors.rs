use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::envelope::Envelope;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptchaError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid uuid: {0}")]
    InvalidUuid(String),
}

impl IntoResponse for CaptchaError {
    fn into_response(self) -> Response {
        let (status, envelope) = match &self {
            CaptchaError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Envelope::error("An internal database error occurred"),
            ),
            CaptchaError::InvalidUuid(_) => (
                StatusCode::BAD_REQUEST,
                Envelope::error_with_code(400, "Invalid captcha uuid"),
            ),
        };

        (status, Json(envelope)).into_response()
    }
}
