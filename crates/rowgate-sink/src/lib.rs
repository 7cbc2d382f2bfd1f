//! Persistence for validated rows.
//!
//! A [`Sink`] appends a batch of accepted rows to a destination table. The
//! SQLite implementation creates the table on first use, inferring column
//! types from the batch header:
//!
//! | Column type        | SQLite type |
//! |--------------------|-------------|
//! | integer, boolean   | `INTEGER`   |
//! | float, all-missing | `REAL`      |
//! | text               | `TEXT`      |
//!
//! Later batches append by column name and never redefine the table. Only
//! column names are checked against an existing table: a batch carrying a
//! column the table lacks fails here rather than during validation. Values
//! are not type-checked against the declared column types. SQLite applies
//! type affinity instead, so a `29.5` appended to an `INTEGER` column is
//! stored as a real, and text that does not look numeric is stored as text.
//! Readers of the table must not assume every value matches the declared
//! type. Constraints declared on a pre-existing table (`NOT NULL`, `CHECK`)
//! are still enforced and fail the whole batch.

mod error;
mod sqlite;

use std::path::PathBuf;

use rowgate_model::{AcceptedRow, Column};

pub use error::{Result, SinkError};
pub use sqlite::{SqliteSink, quote_identifier, sqlite_type};

/// Default destination table name.
pub const DEFAULT_TABLE: &str = "titanic";

/// Storage location plus table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub database: PathBuf,
    pub table: String,
}

impl Destination {
    pub fn new(database: impl Into<PathBuf>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
        }
    }

    /// Destination using [`DEFAULT_TABLE`].
    pub fn with_default_table(database: impl Into<PathBuf>) -> Self {
        Self::new(database, DEFAULT_TABLE)
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.database.display(), self.table)
    }
}

/// Append-only row store.
pub trait Sink {
    /// Appends every row in one atomic unit and returns the number written.
    ///
    /// `columns` gives the name and type of each value position in `rows`.
    fn append(&mut self, columns: &[Column], rows: &[AcceptedRow]) -> Result<usize>;
}
