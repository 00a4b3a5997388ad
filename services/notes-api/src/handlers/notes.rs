//! Note CRUD handlers
//!
//! All routes require a valid access token. Every query is scoped to the
//! authenticated owner, so one user can never read or write another's notes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quill_db::{NoteRepository, NoteRow, UpsertNote};
use quill_types::NoteId;

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SaveNoteRequest {
    /// Omitted for new notes; the server assigns an id.
    pub id: Option<NoteId>,
    pub title: String,
    pub content: String,
    pub color: i64,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub color: i64,
    pub created_at: DateTime<Utc>,
}

impl From<NoteRow> for NoteResponse {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.note_id(),
            title: row.title,
            content: row.content,
            color: row.color,
            created_at: row.created_at,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /notes
///
/// Create a note, or update it if the caller already owns a note with the
/// given id. An id owned by someone else behaves as if it did not exist.
pub async fn save_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SaveNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    let note = UpsertNote {
        id: req.id.unwrap_or_default().0,
        owner_id: auth.user_id.0,
        title: req.title,
        content: req.content,
        color: req.color,
    };

    let row = state
        .repos
        .notes
        .upsert(note)
        .await?
        .ok_or(ApiError::NoteNotFound)?;

    Ok(Json(row.into()))
}

/// GET /notes
///
/// List the caller's notes, newest first.
pub async fn list_notes(
    auth: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    let rows = state.repos.notes.find_by_owner(auth.user_id.0).await?;
    Ok(Json(rows.into_iter().map(NoteResponse::from).collect()))
}

/// DELETE /notes/{id}
///
/// Delete one of the caller's notes. Deleting a note the caller does not
/// own is reported the same as deleting one that never existed.
pub async fn delete_note(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<NoteId>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .repos
        .notes
        .delete_by_id_and_owner(id.0, auth.user_id.0)
        .await?;

    if deleted == 0 {
        return Err(ApiError::NoteNotFound);
    }

    tracing::debug!(user_id = %auth.user_id, note_id = %id, "Note deleted");
    Ok(StatusCode::NO_CONTENT)
}
