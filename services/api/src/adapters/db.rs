//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the SQLite database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notes_core::domain::{Note, NoteDraft, NotePatch, User, UserCredentials};
use notes_core::ports::{DatabaseService, PortError, PortResult};
use sqlx::{FromRow, SqlitePool};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    id: i64,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            email: self.email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    id: i64,
    email: String,
    password_hash: String,
}
impl CredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

#[derive(FromRow)]
struct NoteRecord {
    id: i64,
    title: String,
    content: Option<String>,
    category: Option<String>,
    folder: Option<String>,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}
impl NoteRecord {
    fn to_domain(self) -> Note {
        Note {
            id: self.id,
            title: self.title,
            content: self.content,
            category: self.category,
            folder: self.folder,
            user_id: self.user_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

const NOTE_COLUMNS: &str =
    "id, title, content, category, folder, user_id, created_at, updated_at, deleted_at";

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user(&self, email: &str, password_hash: &str) -> PortResult<User> {
        let now = Utc::now();
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (email, password_hash, created_at, updated_at) \
             VALUES (?, ?, ?, ?) RETURNING id, email, created_at, updated_at",
        )
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The UNIQUE constraint on email is the conflict source.
            if e.as_database_error()
                .map_or(false, |db_err| db_err.is_unique_violation())
            {
                PortError::Conflict("Email already registered".to_string())
            } else {
                PortError::Unexpected(e.to_string())
            }
        })?;

        Ok(record.to_domain())
    }

    async fn get_user_by_id(&self, user_id: i64) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, created_at, updated_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound("User not found".to_string()),
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT id, email, password_hash FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound("User not found".to_string()),
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn get_user_credentials(&self, user_id: i64) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT id, email, password_hash FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound("User not found".to_string()),
            _ => PortError::Unexpected(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn update_user_password(&self, user_id: i64, password_hash: &str) -> PortResult<()> {
        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn create_note(&self, user_id: i64, draft: &NoteDraft) -> PortResult<Note> {
        let now = Utc::now();
        let record = sqlx::query_as::<_, NoteRecord>(&format!(
            "INSERT INTO notes (title, content, category, folder, user_id, created_at, updated_at, deleted_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, NULL) RETURNING {NOTE_COLUMNS}"
        ))
        .bind(&draft.title)
        .bind(draft.content.as_deref())
        .bind(draft.category.as_deref())
        .bind(draft.folder.as_deref())
        .bind(user_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.to_domain())
    }

    async fn list_active_notes(&self, user_id: i64) -> PortResult<Vec<Note>> {
        let records = sqlx::query_as::<_, NoteRecord>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes \
             WHERE user_id = ? AND deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn list_trashed_notes(&self, user_id: i64) -> PortResult<Vec<Note>> {
        let records = sqlx::query_as::<_, NoteRecord>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes \
             WHERE user_id = ? AND deleted_at IS NOT NULL \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn get_note_owned(&self, user_id: i64, note_id: i64) -> PortResult<Note> {
        let record = sqlx::query_as::<_, NoteRecord>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"
        ))
        .bind(note_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound("Note not found".to_string()),
            _ => PortError::Unexpected(e.to_string()),
        })?;

        // Ownership is a column comparison, never an implicit join.
        if record.user_id != user_id {
            return Err(PortError::Unauthorized);
        }

        Ok(record.to_domain())
    }

    async fn update_note(
        &self,
        user_id: i64,
        note_id: i64,
        patch: &NotePatch,
    ) -> PortResult<Note> {
        let mut note = self.get_note_owned(user_id, note_id).await?;
        patch.apply_to(&mut note);

        let record = sqlx::query_as::<_, NoteRecord>(&format!(
            "UPDATE notes SET title = ?, content = ?, category = ?, folder = ?, updated_at = ? \
             WHERE id = ? RETURNING {NOTE_COLUMNS}"
        ))
        .bind(&note.title)
        .bind(note.content.as_deref())
        .bind(note.category.as_deref())
        .bind(note.folder.as_deref())
        .bind(Utc::now())
        .bind(note_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.to_domain())
    }

    async fn soft_delete_note(&self, user_id: i64, note_id: i64) -> PortResult<()> {
        self.get_note_owned(user_id, note_id).await?;

        let now = Utc::now();
        sqlx::query("UPDATE notes SET deleted_at = ?, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(now)
            .bind(note_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn restore_note(&self, user_id: i64, note_id: i64) -> PortResult<Note> {
        self.get_note_owned(user_id, note_id).await?;

        let record = sqlx::query_as::<_, NoteRecord>(&format!(
            "UPDATE notes SET deleted_at = NULL, updated_at = ? \
             WHERE id = ? RETURNING {NOTE_COLUMNS}"
        ))
        .bind(Utc::now())
        .bind(note_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(record.to_domain())
    }

    async fn hard_delete_note(&self, user_id: i64, note_id: i64) -> PortResult<()> {
        self.get_note_owned(user_id, note_id).await?;

        sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(note_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }
}
