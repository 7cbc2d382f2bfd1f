//! Fatal pipeline failures.

use rowgate_ingest::IngestError;
use rowgate_model::ModelError;
use rowgate_sink::SinkError;
use rowgate_validate::ValidateError;
use thiserror::Error;

/// A failure that halts the run. Each variant maps to its own exit code.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input could not be read or parsed.
    #[error("load failed: {0}")]
    Load(#[from] IngestError),

    /// Required columns are absent or ambiguous.
    #[error("schema check failed: {0}")]
    Schema(#[source] ValidateError),

    /// A required column holds values of the wrong type.
    #[error("type check failed: {0}")]
    Type(#[source] ValidateError),

    /// Every row was rejected; nothing was written.
    #[error("{0}")]
    EmptyResult(#[source] ValidateError),

    /// The destination rejected the batch; nothing was written.
    #[error("insert failed: {0}")]
    Insert(#[from] SinkError),

    /// The rule set could not be loaded.
    #[error(transparent)]
    Rules(#[from] ModelError),
}

impl PipelineError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Rules(_) => 2,
            Self::Load(_) => 3,
            Self::Schema(_) => 4,
            Self::Type(_) => 5,
            Self::EmptyResult(_) => 6,
            Self::Insert(_) => 7,
        }
    }
}

impl From<ValidateError> for PipelineError {
    fn from(err: ValidateError) -> Self {
        match err {
            ValidateError::NoAcceptedRows { .. } => Self::EmptyResult(err),
            ValidateError::ColumnType { .. } => Self::Type(err),
            ValidateError::MissingColumns { .. } | ValidateError::DuplicateColumn { .. } => {
                Self::Schema(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_keep_their_kind() {
        let schema = PipelineError::from(ValidateError::MissingColumns {
            missing: vec!["age".to_string()],
            available: vec!["name".to_string()],
        });
        assert!(matches!(schema, PipelineError::Schema(_)));
        assert_eq!(schema.exit_code(), 4);

        let ty = PipelineError::from(ValidateError::ColumnType {
            column: "age".to_string(),
            expected: "numeric",
            found: "text".to_string(),
        });
        assert_eq!(ty.exit_code(), 5);

        let empty = PipelineError::from(ValidateError::NoAcceptedRows { rejected: 3 });
        assert_eq!(empty.exit_code(), 6);
        assert_eq!(empty.to_string(), "no valid rows to insert (3 rows rejected)");
    }

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            PipelineError::Load(IngestError::EmptyDataset {
                input: "x.csv".to_string(),
            })
            .exit_code(),
            PipelineError::from(ValidateError::DuplicateColumn {
                column: "AGE".to_string(),
                existing: "age".to_string(),
            })
            .exit_code(),
            PipelineError::Insert(SinkError::InvalidTableName {
                table: String::new(),
            })
            .exit_code(),
        ];
        assert_eq!(codes, [3, 4, 7]);
    }
}
