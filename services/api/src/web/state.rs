//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use notes_core::ports::{DatabaseService, TokenService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers: the store handle and the token signer.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub tokens: Arc<dyn TokenService>,
}
