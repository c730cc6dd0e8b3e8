//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification, aggregating the
//! annotated paths and schemas from the handler modules.

use utoipa::OpenApi;

use crate::web::{auth, notes, users, SuccessResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_handler,
        auth::login_handler,
        users::me_handler,
        users::change_password_handler,
        notes::create_note_handler,
        notes::list_notes_handler,
        notes::get_note_handler,
        notes::update_note_handler,
        notes::soft_delete_note_handler,
        notes::restore_note_handler,
        notes::hard_delete_note_handler,
    ),
    components(
        schemas(
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::TokenResponse,
            users::MeResponse,
            users::ChangePasswordRequest,
            notes::CreateNoteRequest,
            notes::UpdateNoteRequest,
            notes::NoteResponse,
            SuccessResponse,
        )
    ),
    tags(
        (name = "Notes API", description = "Personal notes with folders, categories, and a trash.")
    )
)]
pub struct ApiDoc;
