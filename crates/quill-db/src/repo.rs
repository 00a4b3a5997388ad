//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by email (exact match)
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user
    ///
    /// Fails with [`crate::DbError::UniqueViolation`] when the email is taken.
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Refresh token repository trait
///
/// Records are keyed by `(user_id, token_hash)`. Expiry is passive: expired
/// rows are invisible to lookups and deletions until a purge removes them.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a hashed refresh token for a user
    async fn save(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()>;

    /// Find a live token record by user and hash
    async fn find_by_user_and_hash(
        &self,
        user_id: Uuid,
        token_hash: &str,
    ) -> DbResult<Option<RefreshTokenRow>>;

    /// Delete a live token record, returning the number of rows removed
    ///
    /// At most one concurrent caller observes 1 for a given record.
    async fn delete_by_user_and_hash(&self, user_id: Uuid, token_hash: &str) -> DbResult<u64>;

    /// Delete expired token records
    async fn delete_expired(&self) -> DbResult<u64>;
}

/// Note repository trait
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note, or update title, content and color when the id
    /// already belongs to this owner
    ///
    /// Returns `None` when the id exists under a different owner; nothing
    /// is written in that case.
    async fn upsert(&self, note: UpsertNote) -> DbResult<Option<NoteRow>>;

    /// List a user's notes, newest first
    async fn find_by_owner(&self, owner_id: Uuid) -> DbResult<Vec<NoteRow>>;

    /// Delete a note owned by the given user, returning the number of rows removed
    async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> DbResult<u64>;
}

/// Upsert note input
#[derive(Debug, Clone)]
pub struct UpsertNote {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub color: i64,
}
