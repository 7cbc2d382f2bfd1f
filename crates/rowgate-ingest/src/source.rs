//! Input references accepted by the loader.

use std::path::PathBuf;

/// Label used in messages for in-memory input.
pub const BUFFER_LABEL: &str = "<buffer>";

/// Where the delimited text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A file on disk.
    Path(PathBuf),
    /// Already-fetched content, e.g. a downloaded payload or stdin.
    Bytes(Vec<u8>),
}

impl Source {
    /// Display label for logs and error messages.
    pub fn label(&self) -> String {
        match self {
            Source::Path(path) => path.display().to_string(),
            Source::Bytes(_) => BUFFER_LABEL.to_string(),
        }
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Source::Bytes(bytes)
    }
}

/// Loader settings.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Largest file accepted from disk, in bytes.
    pub max_file_size: u64,
    /// Rows scanned for type inference; `None` scans every row.
    pub infer_schema_length: Option<usize>,
    /// Cell contents read as missing values.
    pub null_values: Vec<String>,
}

/// Tokens read as missing. Empty cells are always missing.
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_CSV_FILE_SIZE,
            infer_schema_length: None,
            null_values: DEFAULT_NULL_VALUES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    #[must_use]
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }
}
