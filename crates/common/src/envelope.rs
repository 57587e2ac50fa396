//! Platform response envelope.
//!
//! Every service answers with the same JSON shape: `{"code": ..., "msg": ...}`,
//! optionally carrying a `data` payload. Code `0` means success; error
//! responses use `500` unless a more specific code is supplied.

use serde::{Deserialize, Serialize};

/// Success code used by [`Envelope::ok`]
pub const CODE_OK: i32 = 0;

/// Generic error code used by [`Envelope::error`]
pub const CODE_ERROR: i32 = 500;

/// The bare `{code, msg}` envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i32,
    pub msg: String,
}

impl Envelope {
    /// Success envelope: `{"code": 0, "msg": "success"}`
    #[must_use]
    pub fn ok() -> Self {
        Self {
            code: CODE_OK,
            msg: "success".to_string(),
        }
    }

    /// Error envelope with the generic error code
    #[must_use]
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            code: CODE_ERROR,
            msg: msg.into(),
        }
    }

    /// Error envelope with an explicit code
    #[must_use]
    pub fn error_with_code(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }
}

/// Envelope carrying a typed payload in `data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> DataEnvelope<T> {
    /// Success envelope wrapping `data`
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            code: CODE_OK,
            msg: "success".to_string(),
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let json = serde_json::to_value(Envelope::ok()).unwrap();
        assert_eq!(json, serde_json::json!({"code": 0, "msg": "success"}));
    }

    #[test]
    fn test_error_envelope_shape() {
        let json = serde_json::to_value(Envelope::error("User Token Forbidden or Expired!")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": 500, "msg": "User Token Forbidden or Expired!"})
        );
    }

    #[test]
    fn test_error_with_code() {
        let env = Envelope::error_with_code(401, "unauthorized");
        assert_eq!(env.code, 401);
        assert_eq!(env.msg, "unauthorized");
    }

    #[test]
    fn test_data_envelope_skips_missing_data() {
        let env = DataEnvelope::<String> {
            code: CODE_OK,
            msg: "success".to_string(),
            data: None,
        };
        let json = serde_json::to_value(env).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_data_envelope_round_trip() {
        let env = DataEnvelope::ok(vec![1, 2, 3]);
        let json = serde_json::to_string(&env).unwrap();
        let back: DataEnvelope<Vec<i32>> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, env);
    }
}
