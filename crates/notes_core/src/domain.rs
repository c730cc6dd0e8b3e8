//! crates/notes_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};

use crate::ports::PortError;

/// Maximum length of a note title, in characters.
pub const TITLE_MAX_LEN: usize = 255;
/// Maximum length of a note category or folder label, in characters.
pub const LABEL_MAX_LEN: usize = 100;

// Represents a user - used throughout the app. Never carries the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Only used internally for login/password changes - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// A single note owned by exactly one user.
///
/// `deleted_at` is the soft-delete marker: `None` means the note is active,
/// `Some(_)` means it sits in the trash and can still be restored.
#[derive(Debug, Clone)]
pub struct Note {
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

impl Note {
    pub fn is_trashed(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// The validated input for creating a note.
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub title: String,
    pub content: Option<String>,
    pub category: Option<String>,
    pub folder: Option<String>,
}

impl NoteDraft {
    pub fn validate(&self) -> Result<(), PortError> {
        validate_title(&self.title)?;
        if let Some(category) = &self.category {
            validate_label("category", category)?;
        }
        if let Some(folder) = &self.folder {
            validate_label("folder", folder)?;
        }
        Ok(())
    }
}

/// A partial update to a note.
///
/// The outer `Option` distinguishes presence from absence: `None` leaves the
/// field untouched, `Some(None)` explicitly clears it. `title` is required on
/// the note itself, so it can be replaced but never cleared.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub folder: Option<Option<String>>,
}

impl NotePatch {
    pub fn validate(&self) -> Result<(), PortError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(Some(category)) = &self.category {
            validate_label("category", category)?;
        }
        if let Some(Some(folder)) = &self.folder {
            validate_label("folder", folder)?;
        }
        Ok(())
    }

    /// Copies only the fields present in the patch onto `note`.
    pub fn apply_to(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(category) = &self.category {
            note.category = category.clone();
        }
        if let Some(folder) = &self.folder {
            note.folder = folder.clone();
        }
    }
}

/// The identity carried by a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClaims {
    pub subject: i64,
    pub email: String,
}

fn validate_title(title: &str) -> Result<(), PortError> {
    if title.is_empty() {
        return Err(PortError::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(PortError::Validation(format!(
            "title must be shorter than or equal to {} characters",
            TITLE_MAX_LEN
        )));
    }
    Ok(())
}

fn validate_label(field: &str, value: &str) -> Result<(), PortError> {
    if value.chars().count() > LABEL_MAX_LEN {
        return Err(PortError::Validation(format!(
            "{} must be shorter than or equal to {} characters",
            field, LABEL_MAX_LEN
        )));
    }
    Ok(())
}
