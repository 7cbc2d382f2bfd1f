//! Error types for data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading input.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is too large ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Input uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {input}; convert the file to UTF-8")]
    UnsupportedEncoding {
        input: String,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// Failed to parse delimited text.
    #[error("failed to parse CSV {input}: {message}")]
    CsvParse { input: String, message: String },

    /// Header is present but there are no data rows.
    #[error("no data rows in {input}")]
    EmptyDataset { input: String },

    /// Two header cells carry the same name.
    #[error("duplicate column name '{column}' in header of {input}")]
    DuplicateColumnName { input: String, column: String },

    /// A header cell is blank.
    #[error("empty column name in header of {input}")]
    EmptyColumnName { input: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
