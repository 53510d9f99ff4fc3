//! Repository Module
//!
//! CRUD operations over the SQLite pool. Repositories are free async
//! functions taking `&SqlitePool`; all reservation-data queries are scoped
//! by `restaurant_id`.

pub mod area;
pub mod dining_table;
pub mod reservation;

use shared::error::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        // Unique-index violations are how slot races surface; keep them
        // distinguishable from opaque storage failures.
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(shared::ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => {
                AppError::with_message(shared::ErrorCode::AlreadyExists, msg)
            }
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
