//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Refresh token row from the database
///
/// The raw token is never stored; `token_hash` holds its SHA-256 digest.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenRow {
    pub user_id: Uuid,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Note row from the database
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub color: i64,
    pub created_at: DateTime<Utc>,
}

// Conversion implementations from Row types to quill-types domain types
impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> quill_types::UserId {
        quill_types::UserId(self.id)
    }
}

impl NoteRow {
    /// Convert to domain NoteId
    pub fn note_id(&self) -> quill_types::NoteId {
        quill_types::NoteId(self.id)
    }
}
