//! services/api/src/web/notes.rs
//!
//! Note endpoints: create, list, fetch, partial update, and the
//! soft-delete/restore/permanent-delete lifecycle.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use notes_core::domain::{Note, NoteDraft, NotePatch};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::web::{error_response, middleware::AuthUser, state::AppState, SuccessResponse};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: Option<String>,
    pub category: Option<String>,
    pub folder: Option<String>,
}

/// Partial update payload. For the nullable fields the outer `Option` tracks
/// presence: an absent field is left untouched, an explicit `null` clears it.
#[derive(Default, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub folder: Option<Option<String>>,
}

/// Marks a field as present even when its value is `null`, so that
/// "explicitly cleared" and "not sent" stay distinguishable after
/// deserialization.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
pub struct ListNotesQuery {
    pub trashed: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub category: Option<String>,
    pub folder: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            category: note.category,
            folder: note.folder,
            user_id: note.user_id,
            created_at: note.created_at,
            updated_at: note.updated_at,
            deleted_at: note.deleted_at,
        }
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /notes - Create a note
#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Invalid title, category, or folder")
    )
)]
pub async fn create_note_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let draft = NoteDraft {
        title: req.title,
        content: req.content,
        category: req.category,
        folder: req.folder,
    };
    draft.validate().map_err(error_response)?;

    let note = state
        .db
        .create_note(user_id, &draft)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(NoteResponse::from(note))))
}

/// GET /notes - List the caller's notes
///
/// Returns active notes by default; `?trashed=1` or `?trashed=true` selects
/// the trash instead.
#[utoipa::path(
    get,
    path = "/notes",
    params(
        ("trashed" = Option<String>, Query, description = "Set to `1` or `true` to list trashed notes")
    ),
    responses(
        (status = 200, description = "The caller's notes, newest first", body = [NoteResponse])
    )
)]
pub async fn list_notes_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<ListNotesQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let trashed = matches!(query.trashed.as_deref(), Some("1") | Some("true"));

    let notes = if trashed {
        state.db.list_trashed_notes(user_id).await
    } else {
        state.db.list_active_notes(user_id).await
    }
    .map_err(error_response)?;

    let body: Vec<NoteResponse> = notes.into_iter().map(NoteResponse::from).collect();
    Ok(Json(body))
}

/// GET /notes/{id} - Fetch a single owned note
#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(("id" = i64, Path, description = "Note id")),
    responses(
        (status = 200, description = "The note", body = NoteResponse),
        (status = 401, description = "Note belongs to another user"),
        (status = 404, description = "No such note")
    )
)]
pub async fn get_note_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(note_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let note = state
        .db
        .get_note_owned(user_id, note_id)
        .await
        .map_err(error_response)?;

    Ok(Json(NoteResponse::from(note)))
}

/// PATCH /notes/{id} - Partially update an owned note
#[utoipa::path(
    patch,
    path = "/notes/{id}",
    params(("id" = i64, Path, description = "Note id")),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "The updated note", body = NoteResponse),
        (status = 400, description = "Invalid title, category, or folder"),
        (status = 401, description = "Note belongs to another user"),
        (status = 404, description = "No such note")
    )
)]
pub async fn update_note_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(note_id): Path<i64>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let patch = NotePatch {
        title: req.title,
        content: req.content,
        category: req.category,
        folder: req.folder,
    };
    patch.validate().map_err(error_response)?;

    let note = state
        .db
        .update_note(user_id, note_id, &patch)
        .await
        .map_err(error_response)?;

    Ok(Json(NoteResponse::from(note)))
}

/// DELETE /notes/{id} - Move an owned note to the trash
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(("id" = i64, Path, description = "Note id")),
    responses(
        (status = 200, description = "Note moved to the trash", body = SuccessResponse),
        (status = 401, description = "Note belongs to another user"),
        (status = 404, description = "No such note")
    )
)]
pub async fn soft_delete_note_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(note_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .db
        .soft_delete_note(user_id, note_id)
        .await
        .map_err(error_response)?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /notes/{id}/restore - Restore an owned note from the trash
///
/// Restoring an already-active note succeeds as a no-op.
#[utoipa::path(
    post,
    path = "/notes/{id}/restore",
    params(("id" = i64, Path, description = "Note id")),
    responses(
        (status = 200, description = "The restored note", body = NoteResponse),
        (status = 401, description = "Note belongs to another user"),
        (status = 404, description = "No such note")
    )
)]
pub async fn restore_note_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(note_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let note = state
        .db
        .restore_note(user_id, note_id)
        .await
        .map_err(error_response)?;

    Ok(Json(NoteResponse::from(note)))
}

/// DELETE /notes/{id}/permanent - Permanently delete an owned note
///
/// Works from the trash or directly on an active note. No recovery possible.
#[utoipa::path(
    delete,
    path = "/notes/{id}/permanent",
    params(("id" = i64, Path, description = "Note id")),
    responses(
        (status = 200, description = "Note permanently deleted", body = SuccessResponse),
        (status = 401, description = "Note belongs to another user"),
        (status = 404, description = "No such note")
    )
)]
pub async fn hard_delete_note_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(note_id): Path<i64>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .db
        .hard_delete_note(user_id, note_id)
        .await
        .map_err(error_response)?;

    Ok(Json(SuccessResponse { success: true }))
}
