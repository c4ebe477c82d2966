//! Repository Module
//!
//! SQL access for each persisted resource. Absence is reported as `Ok(None)`,
//! conditional writes that match no row as `Ok(false)`/`Ok(None)`; `RepoError`
//! is reserved for constraint violations and store failures.

pub mod dining_table;
pub mod user;

pub use dining_table::DiningTableRepository;
pub use user::UserRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// A UNIQUE constraint rejected the write
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// No pooled connection became available in time
    #[error("Database pool timed out")]
    Timeout,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => RepoError::Timeout,
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::Duplicate(db_err.message().to_string())
            }
            other => RepoError::Database(other.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
