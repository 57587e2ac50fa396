use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::envelope::Envelope;
use thiserror::Error;

/// Message returned to callers when token extraction fails
pub const TOKEN_REJECTION_MSG: &str = "User Token Forbidden or Expired!";

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Token extraction failed: {0}")]
    TokenExtraction(String),

    #[error("Upstream request failed: {0}")]
    Upstream(String),
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        match self {
            // The access filter answers extraction failures with HTTP 200 and
            // the platform error envelope. Legacy clients key off the body,
            // not the status line.
            GateError::TokenExtraction(_) => (
                StatusCode::OK,
                Json(Envelope::error(TOKEN_REJECTION_MSG)),
            )
                .into_response(),
            GateError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                Json(Envelope::error("Upstream request failed")),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_extraction_renders_200_with_envelope() {
        let response = GateError::TokenExtraction("bad header".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_upstream_renders_502() {
        let response = GateError::Upstream("connect refused".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
