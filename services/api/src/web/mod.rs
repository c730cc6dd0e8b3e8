//! services/api/src/web/mod.rs
//!
//! The web layer: router assembly, auth middleware, handlers, and the shared
//! mapping from port errors onto HTTP responses.

pub mod auth;
pub mod middleware;
pub mod notes;
pub mod rest;
pub mod state;
pub mod users;

pub use middleware::require_auth;

use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use notes_core::ports::PortError;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::state::AppState;

/// The `{"success": true}` acknowledgement returned by delete operations and
/// password changes.
#[derive(Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Translates a port error into the response the client sees.
///
/// `Unexpected` detail is logged and replaced with a generic message; every
/// other variant carries a caller-safe message already.
pub(crate) fn error_response(err: PortError) -> (StatusCode, String) {
    match err {
        PortError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        PortError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        PortError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        PortError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        PortError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        PortError::Unexpected(detail) => {
            error!("Unexpected service error: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

/// Builds the API router: public auth routes plus the protected surface
/// behind the bearer-token middleware. Shared between the server binary and
/// the integration tests.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/login", post(auth::login_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/users/me", get(users::me_handler))
        .route("/users/me/password", patch(users::change_password_handler))
        .route(
            "/notes",
            post(notes::create_note_handler).get(notes::list_notes_handler),
        )
        .route(
            "/notes/{id}",
            get(notes::get_note_handler)
                .patch(notes::update_note_handler)
                .delete(notes::soft_delete_note_handler),
        )
        .route("/notes/{id}/restore", post(notes::restore_note_handler))
        .route(
            "/notes/{id}/permanent",
            delete(notes::hard_delete_note_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
