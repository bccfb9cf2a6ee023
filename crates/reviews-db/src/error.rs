//! Database error types for reviews-db.

use reviews_config::ConfigError;
use reviews_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A review failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Content type or registry error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration could not be turned into review rules.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
