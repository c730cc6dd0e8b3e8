//! crates/notes_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or
//! signing schemes.

use async_trait::async_trait;

use crate::domain::{AuthClaims, Note, NoteDraft, NotePatch, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// Each variant maps to exactly one class of caller-visible failure; the web
/// layer translates them to HTTP statuses. `Unexpected` carries internal
/// detail that must be logged, not returned to the client.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- Credential Store ---

    /// Persists a new user. Fails with `Conflict` if the email is taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> PortResult<User>;

    async fn get_user_by_id(&self, user_id: i64) -> PortResult<User>;

    /// Fails with `NotFound` when no user has this email. Callers on the
    /// login path must collapse that into `Unauthorized` so responses never
    /// reveal whether an email is registered.
    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials>;

    async fn get_user_credentials(&self, user_id: i64) -> PortResult<UserCredentials>;

    async fn update_user_password(&self, user_id: i64, password_hash: &str) -> PortResult<()>;

    // --- Note Store and Lifecycle ---

    async fn create_note(&self, user_id: i64, draft: &NoteDraft) -> PortResult<Note>;

    /// Notes owned by `user_id` with no deletion marker, newest first.
    async fn list_active_notes(&self, user_id: i64) -> PortResult<Vec<Note>>;

    /// Notes owned by `user_id` sitting in the trash, newest first.
    async fn list_trashed_notes(&self, user_id: i64) -> PortResult<Vec<Note>>;

    /// The single ownership-check primitive. Fails `NotFound` if the note
    /// does not exist and `Unauthorized` if it belongs to someone else.
    /// Every mutating note operation resolves through this first.
    async fn get_note_owned(&self, user_id: i64, note_id: i64) -> PortResult<Note>;

    async fn update_note(&self, user_id: i64, note_id: i64, patch: &NotePatch)
        -> PortResult<Note>;

    async fn soft_delete_note(&self, user_id: i64, note_id: i64) -> PortResult<()>;

    /// Clears the deletion marker. Succeeds even when the note is already
    /// active; callers treat restore as idempotent.
    async fn restore_note(&self, user_id: i64, note_id: i64) -> PortResult<Note>;

    /// Removes the row permanently. Reachable for active notes too
    /// (skip-trash deletion). No recovery possible.
    async fn hard_delete_note(&self, user_id: i64, note_id: i64) -> PortResult<()>;
}

/// Issues and validates the signed bearer tokens carried by clients.
/// Signing is pure computation, so this port is synchronous.
pub trait TokenService: Send + Sync {
    fn issue(&self, user_id: i64, email: &str) -> PortResult<String>;

    /// Fails `Unauthorized` on malformed tokens, bad signatures, or expiry.
    fn validate(&self, token: &str) -> PortResult<AuthClaims>;
}
