//! Authentication API endpoints
//!
//! - POST /auth/register - Register a username and password
//! - POST /auth/login - Exchange credentials for a session token
//! - GET /auth/validate - Resolve a bearer token to its username

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::common::decode_json;
use crate::api::middleware::{extract_bearer_token, ApiError, AppState};

/// Request body for register and login
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub username: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/validate", get(validate))
}

async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let body: CredentialsRequest = decode_json(&body)?;
    state
        .auth_service
        .register(&body.username, &body.password)
        .await?;
    Ok(StatusCode::CREATED)
}

async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let body: CredentialsRequest = decode_json(&body)?;
    let token = state
        .auth_service
        .login(&body.username, &body.password)
        .await?;
    Ok(Json(TokenResponse { token }))
}

async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;
    let username = state.auth_service.validate_token(token)?;
    Ok(Json(ValidateResponse { username }))
}
