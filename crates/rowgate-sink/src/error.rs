//! Sink error types.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence failure. Any error leaves the destination table unchanged.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Table name is empty or contains a NUL byte.
    #[error("invalid table name '{table}'")]
    InvalidTableName { table: String },

    /// Could not open or create the database file.
    #[error("failed to open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Could not create the database directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Existing table lacks columns present in the batch.
    #[error("table '{table}' has no column(s) [{}]", missing.join(", "))]
    ColumnMismatch { table: String, missing: Vec<String> },

    /// Statement failed.
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// Result type for sink operations.
pub type Result<T> = std::result::Result<T, SinkError>;
