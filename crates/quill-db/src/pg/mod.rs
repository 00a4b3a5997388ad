//! PostgreSQL repository implementations

mod note;
mod refresh_token;
mod user;

pub use note::PgNoteRepository;
pub use refresh_token::PgRefreshTokenRepository;
pub use user::PgUserRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub refresh_tokens: PgRefreshTokenRepository,
    pub notes: PgNoteRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            refresh_tokens: PgRefreshTokenRepository::new(pool.clone()),
            notes: PgNoteRepository::new(pool),
        }
    }
}
