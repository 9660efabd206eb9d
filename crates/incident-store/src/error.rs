//! Store error types.

use thiserror::Error;

/// Errors that can occur during persistence operations.
///
/// These propagate to the caller for retry; nothing here is fatal to the
/// process.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLx error (connection, query, etc.)
    #[error("storage error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Record already exists
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// A stored value could not be decoded into its domain type
    #[error("corrupt {field}: {detail}")]
    Decode { field: &'static str, detail: String },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
