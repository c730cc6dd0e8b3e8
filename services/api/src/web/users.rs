//! services/api/src/web/users.rs
//!
//! Account endpoints for the authenticated user.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::web::{error_response, middleware::AuthUser, state::AppState, SuccessResponse};

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /users/me - The authenticated user's profile
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "The caller's profile", body = MeResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user = state
        .db
        .get_user_by_id(user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
        created_at: user.created_at,
    }))
}

/// PATCH /users/me/password - Change the caller's password
#[utoipa::path(
    patch,
    path = "/users/me/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = SuccessResponse),
        (status = 403, description = "Current password is incorrect")
    )
)]
pub async fn change_password_handler(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Validate the input
    if req.new_password.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "newPassword must not be empty".to_string(),
        ));
    }

    // 2. Load the stored hash
    let creds = state
        .db
        .get_user_credentials(user_id)
        .await
        .map_err(error_response)?;

    // 3. The current password must match before anything changes
    let parsed_hash = PasswordHash::new(&creds.password_hash).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication error".to_string(),
        )
    })?;

    let valid = Argon2::default()
        .verify_password(req.current_password.as_bytes(), &parsed_hash)
        .is_ok();

    if !valid {
        return Err((
            StatusCode::FORBIDDEN,
            "Current password is incorrect".to_string(),
        ));
    }

    // 4. Hash and store the new password
    let salt = SaltString::generate(&mut OsRng);
    let new_hash = Argon2::default()
        .hash_password(req.new_password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to hash password".to_string(),
            )
        })?
        .to_string();

    state
        .db
        .update_user_password(user_id, &new_hash)
        .await
        .map_err(error_response)?;

    Ok(Json(SuccessResponse { success: true }))
}
