//! Common API utilities shared by the endpoint modules

use serde::de::DeserializeOwned;

use crate::api::middleware::ApiError;

/// Parse a path segment as a non-negative row id
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| {
            ApiError::validation_error(format!(
                "Invalid id '{}': expected a non-negative integer",
                raw
            ))
        })
}

/// Decode a JSON request body.
///
/// Any syntax or shape error is a 400 regardless of Content-Type, so clients
/// get the same answer for every kind of malformed body.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::validation_error(format!("Invalid JSON body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_parse_id_accepts_non_negative_integers() {
        assert_eq!(parse_id("0").unwrap(), 0);
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn test_parse_id_rejects_everything_else() {
        for raw in ["abc", "-1", "1.5", "", "99999999999999999999"] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "input {:?}", raw);
        }
    }

    #[test]
    fn test_decode_json_malformed_is_bad_request() {
        let err = decode_json::<serde_json::Value>(b"{not json").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.error.message.starts_with("Invalid JSON body"));
    }
}
