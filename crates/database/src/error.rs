//! Database error types.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Underlying SQLx failure (connection, query, decode).
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Schema migration failure.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Row lookup came up empty.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Insert hit a uniqueness constraint.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
