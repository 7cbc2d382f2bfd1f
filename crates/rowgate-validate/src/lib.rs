//! Dataset validation for rowgate.
//!
//! Validation runs in two phases:
//!
//! 1. **Schema**: header names are trimmed and matched case-insensitively
//!    against the rule set; every required column must be present and
//!    numeric. Failures are fatal ([`ValidateError`]).
//! 2. **Rows**: each record is checked against the field rules, producing
//!    an accepted row or a [`Rejection`] diagnostic. Rejections are
//!    recoverable; only an empty accepted set is fatal.

mod error;
mod rows;
mod schema;
mod util;

use rowgate_model::{AcceptedRow, Column, RawDataset, Rejection, RuleSet};

pub use error::{Result, ValidateError};
pub use rows::{RowPartition, evaluate_row, satisfies, validate_rows};
pub use schema::{Binding, ColumnBindings, build_column_lookup, check_schema};
pub use util::{CaseInsensitiveSet, normalize_key};

/// Result of a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Header with trimmed names; accepted rows follow this column order.
    pub columns: Vec<Column>,
    pub accepted: Vec<AcceptedRow>,
    pub rejections: Vec<Rejection>,
}

/// Runs schema checks and row evaluation over a loaded dataset.
pub fn validate_dataset(dataset: &RawDataset, rules: &RuleSet) -> Result<ValidationOutcome> {
    let ColumnBindings { bindings, columns } = check_schema(dataset, rules)?;
    let RowPartition {
        accepted,
        rejections,
    } = validate_rows(dataset, &bindings);

    if accepted.is_empty() {
        return Err(ValidateError::NoAcceptedRows {
            rejected: rejections.len(),
        });
    }

    tracing::info!(
        valid_rows = accepted.len(),
        skipped_rows = rejections.len(),
        "data validation complete"
    );
    Ok(ValidationOutcome {
        columns,
        accepted,
        rejections,
    })
}
