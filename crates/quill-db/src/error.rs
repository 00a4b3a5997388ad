//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// Pool exhausted before a connection became available
    #[error("database timeout")]
    Timeout,

    /// Unique constraint violated
    #[error("unique constraint violated")]
    UniqueViolation,
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => Self::Timeout,
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                Self::UniqueViolation
            }
            _ => Self::Sqlx(err),
        }
    }
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;
