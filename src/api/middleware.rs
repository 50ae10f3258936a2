//! Shared request plumbing
//!
//! Contains:
//! - `AppState` shared by every handler
//! - `ApiError`, the JSON error envelope and its status mapping
//! - Bearer token extraction

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::services::{AuthService, AuthServiceError, NoteService, NoteServiceError};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub note_service: Arc<NoteService>,
    pub auth_service: Arc<AuthService>,
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn validation_details(message: impl Into<String>, details: serde_json::Value) -> Self {
        Self::with_details("VALIDATION_ERROR", message, details)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            "CONFLICT" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(message = %self.error.message, "Request failed");
        }
        (status, Json(self)).into_response()
    }
}

/// Every note failure is a 500, including a missing id.
impl From<NoteServiceError> for ApiError {
    fn from(e: NoteServiceError) -> Self {
        ApiError::internal_error(e.to_string())
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(e: AuthServiceError) -> Self {
        match e {
            AuthServiceError::ValidationError(msg) => ApiError::validation_error(msg),
            AuthServiceError::UserExists(msg) => ApiError::conflict(msg),
            AuthServiceError::InvalidCredentials | AuthServiceError::InvalidToken => {
                ApiError::unauthorized(e.to_string())
            }
            AuthServiceError::InternalError(_) => ApiError::internal_error(e.to_string()),
        }
    }
}

/// Extract a bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
