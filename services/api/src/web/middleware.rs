//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::web::state::AppState;

/// The authenticated caller, resolved from a validated bearer token and
/// carried in request extensions for handlers.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

/// Middleware that validates the bearer token and extracts the user id.
///
/// If valid, inserts an `AuthUser` into request extensions for handlers to use.
/// If invalid or missing, returns 401 Unauthorized before business logic runs.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // 1. Extract the Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 2. Parse the bearer token from it
    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // 3. Validate the token, get the caller's identity
    let claims = state
        .tokens
        .validate(token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    // 4. Insert the typed user id into request extensions
    req.extensions_mut().insert(AuthUser(claims.subject));

    // 5. Continue to the handler
    Ok(next.run(req).await)
}
