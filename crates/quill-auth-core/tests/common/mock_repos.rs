//! Mock repositories for testing

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use quill_db::{
    CreateUser, DbError, DbResult, RefreshTokenRepository, RefreshTokenRow, UserRepository,
    UserRow,
};
use std::sync::Arc;
use uuid::Uuid;

/// In-memory user repository for testing
#[derive(Default, Clone)]
pub struct MockUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_email: Arc<DashMap<String, Uuid>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test user directly
    #[allow(dead_code)]
    pub fn insert_user(&self, user: UserRow) {
        self.by_email.insert(user.email.clone(), user.id);
        self.users.insert(user.id, user);
    }

    /// Remove a user, simulating account deletion
    #[allow(dead_code)]
    pub fn remove_user(&self, id: Uuid) {
        if let Some((_, user)) = self.users.remove(&id) {
            self.by_email.remove(&user.email);
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        if self.by_email.contains_key(&user.email) {
            return Err(DbError::UniqueViolation);
        }
        let row = UserRow {
            id: user.id,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        self.insert_user(row.clone());
        Ok(row)
    }
}

/// In-memory refresh token repository for testing
///
/// Uses the same `(user_id, token_hash)` key as the Postgres table so
/// deletion is a single atomic entry removal.
#[derive(Default, Clone)]
pub struct MockRefreshTokenRepository {
    tokens: Arc<DashMap<(Uuid, String), RefreshTokenRow>>,
}

impl MockRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored token records, expired ones included
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether a record exists for the given user and hash
    #[allow(dead_code)]
    pub fn contains(&self, user_id: Uuid, token_hash: &str) -> bool {
        self.tokens
            .contains_key(&(user_id, token_hash.to_string()))
    }

    /// Backdate every record for a user so it reads as expired
    #[allow(dead_code)]
    pub fn expire_tokens_for_user(&self, user_id: Uuid) {
        let past = Utc::now() - Duration::hours(1);
        for mut entry in self.tokens.iter_mut() {
            if entry.key().0 == user_id {
                entry.value_mut().expires_at = past;
            }
        }
    }
}

#[async_trait]
impl RefreshTokenRepository for MockRefreshTokenRepository {
    async fn save(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<()> {
        let row = RefreshTokenRow {
            user_id,
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            expires_at,
        };
        self.tokens.insert((user_id, token_hash.to_string()), row);
        Ok(())
    }

    async fn find_by_user_and_hash(
        &self,
        user_id: Uuid,
        token_hash: &str,
    ) -> DbResult<Option<RefreshTokenRow>> {
        let now = Utc::now();
        Ok(self
            .tokens
            .get(&(user_id, token_hash.to_string()))
            .filter(|r| r.value().expires_at > now)
            .map(|r| r.value().clone()))
    }

    async fn delete_by_user_and_hash(&self, user_id: Uuid, token_hash: &str) -> DbResult<u64> {
        let now = Utc::now();
        // remove_if is atomic per entry, so two concurrent callers cannot
        // both observe a removal of the same record.
        let removed = self
            .tokens
            .remove_if(&(user_id, token_hash.to_string()), |_, row| {
                row.expires_at > now
            });
        Ok(u64::from(removed.is_some()))
    }

    async fn delete_expired(&self) -> DbResult<u64> {
        let now = Utc::now();
        let expired: Vec<(Uuid, String)> = self
            .tokens
            .iter()
            .filter(|r| r.value().expires_at <= now)
            .map(|r| r.key().clone())
            .collect();

        let mut count = 0;
        for key in expired {
            if self
                .tokens
                .remove_if(&key, |_, row| row.expires_at <= now)
                .is_some()
            {
                count += 1;
            }
        }
        Ok(count)
    }
}
