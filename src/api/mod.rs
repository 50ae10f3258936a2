//! API layer - HTTP handlers and routing
//!
//! - Note endpoints under /notes
//! - Auth endpoints under /auth
//!
//! Every response body is JSON; errors use the [`ApiError`] envelope.

pub mod auth;
pub mod common;
pub mod middleware;
pub mod notes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::db::repositories::{SqlxNoteRepository, SqlxUserRepository};
use crate::db::DatabaseHandle;
use crate::services::{AuthService, NoteService, TokenIssuer};

pub use middleware::{ApiError, AppState};

impl AppState {
    /// Build the services on a storage handle and make sure their tables exist
    pub async fn init(db: DatabaseHandle, tokens: TokenIssuer) -> Result<Self> {
        let note_service = NoteService::new(SqlxNoteRepository::boxed(db.clone()));
        let auth_service = AuthService::new(SqlxUserRepository::boxed(db), tokens);

        note_service
            .ensure_schema()
            .await
            .context("Failed to prepare notes table")?;
        auth_service
            .ensure_schema()
            .await
            .context("Failed to prepare users table")?;

        Ok(Self {
            note_service: Arc::new(note_service),
            auth_service: Arc::new(auth_service),
        })
    }
}

/// Build the API routes without middleware
pub fn build_api_router() -> Router<AppState> {
    Router::new().merge(notes::router()).merge(auth::router())
}

/// Build the complete router with middleware
///
/// `cors_origin` is either `*` or a single origin.
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router> {
    let allow_origin = if cors_origin == "*" {
        AllowOrigin::any()
    } else {
        let origin = cors_origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid CORS origin: {}", cors_origin))?;
        AllowOrigin::exact(origin)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(build_api_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state))
}
