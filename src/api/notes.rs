//! Notes API endpoints
//!
//! - GET /notes - List all notes
//! - POST /notes - Create a note (201, empty body)
//! - GET /notes/{id} - Get a note
//! - PUT/PATCH /notes/{id} - Merge non-empty fields into a note
//! - DELETE /notes/{id} - Delete a note
//!
//! A missing note is reported as 500, the same as a storage failure. Update
//! and delete of an unknown id succeed at the storage level. An update body
//! of `null` changes nothing.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::api::common::{decode_json, parse_id};
use crate::api::middleware::{ApiError, AppState};
use crate::models::{NewNote, NoteInput};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note)
                .put(update_note)
                .patch(update_note)
                .delete(delete_note),
        )
}

async fn list_notes(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let notes = state.note_service.list().await?;
    Ok(Json(notes))
}

async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let note = state.note_service.get_by_id(id).await?;
    Ok(Json(note))
}

async fn create_note(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let input: NoteInput = decode_json(&body)?;
    let note = input.into_new_note().map_err(|violations| {
        ApiError::validation_details("Note validation failed", json!(violations))
    })?;

    state.note_service.create(&note).await?;
    Ok(StatusCode::CREATED)
}

async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let existing = state.note_service.get_by_id(id).await?;
    let patch: NoteInput = decode_json::<Option<NoteInput>>(&body)?.unwrap_or_default();

    let merged = NewNote::from(existing.merge(patch));
    state.note_service.update(id, &merged).await?;
    Ok(StatusCode::OK)
}

async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.note_service.delete(id).await?;
    Ok(StatusCode::OK)
}
