//! API handlers for Notes

use super::handlers::{AppError, NotesState};
use crate::notes::{Note, NoteDraft};
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

/// Query parameters for note search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// List all notes
pub async fn list_notes(State(state): State<NotesState>) -> Result<Json<Vec<Note>>, AppError> {
    Ok(Json(state.notes.list_all().await?))
}

/// Get a note by ID
pub async fn get_note(
    State(state): State<NotesState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Note>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.notes.get_by_id(id).await?))
}

/// Search titles and contents (case-insensitive substring)
pub async fn search_notes(
    State(state): State<NotesState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Note>>, AppError> {
    let Query(SearchQuery { query }) = query?;
    Ok(Json(state.notes.search(&query).await?))
}

/// Create a new note
pub async fn create_note(
    State(state): State<NotesState>,
    body: Result<Json<NoteDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let Json(draft) = body?;
    let note = state.notes.create(draft).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// Replace title and content of a note
pub async fn update_note(
    State(state): State<NotesState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<NoteDraft>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    let Path(id) = id?;
    let Json(draft) = body?;
    Ok(Json(state.notes.update(id, draft).await?))
}

/// Delete a note
pub async fn delete_note(
    State(state): State<NotesState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    state.notes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
