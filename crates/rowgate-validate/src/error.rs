//! Validation error types.

use thiserror::Error;

/// Fatal validation failures. Per-row violations are not errors; they are
/// reported as rejections.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Required columns are absent from the header.
    #[error("missing required columns: [{}]; available columns: [{}]", missing.join(", "), available.join(", "))]
    MissingColumns {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// Two header names normalize to the same column.
    #[error("duplicate column '{column}' (conflicts with '{existing}')")]
    DuplicateColumn { column: String, existing: String },

    /// A required column does not hold values of its declared type class.
    #[error("column '{column}' is not {expected}: found {found}")]
    ColumnType {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// Every row was rejected.
    #[error("no valid rows to insert ({rejected} rows rejected)")]
    NoAcceptedRows { rejected: usize },
}

impl ValidateError {
    /// True for header-level failures (absent or ambiguous columns).
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            Self::MissingColumns { .. } | Self::DuplicateColumn { .. }
        )
    }
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_both_sets() {
        let err = ValidateError::MissingColumns {
            missing: vec!["survived".to_string()],
            available: vec!["Name".to_string(), "Age".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required columns: [survived]; available columns: [Name, Age]"
        );
        assert!(err.is_schema());
    }

    #[test]
    fn type_message_names_column() {
        let err = ValidateError::ColumnType {
            column: "Age".to_string(),
            expected: "numeric",
            found: "text".to_string(),
        };
        assert_eq!(err.to_string(), "column 'Age' is not numeric: found text");
        assert!(!err.is_schema());
    }
}
