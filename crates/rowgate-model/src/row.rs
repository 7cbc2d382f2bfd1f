//! Row-level validation outcomes.

use std::fmt;

use serde::Serialize;

use crate::rules::Constraint;
use crate::value::Value;

/// Offset between a zero-based record index and the row number reported in
/// diagnostics: one for the header line, one for 1-based counting.
pub const HEADER_OFFSET: usize = 2;

/// Diagnostic row number for a zero-based record index.
pub fn row_number(index: usize) -> usize {
    index + HEADER_OFFSET
}

/// A row that passed every field rule, with missing values substituted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedRow {
    pub row_number: usize,
    pub values: Vec<Value>,
}

/// The rule a rejected value broke.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolatedRule {
    /// Value was missing and the field's policy rejects missing values.
    Missing,
    Constraint(Constraint),
}

impl fmt::Display for ViolatedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolatedRule::Missing => f.write_str("value is required"),
            ViolatedRule::Constraint(constraint) => f.write_str(&constraint.describe()),
        }
    }
}

/// A row removed from the accepted set, with the first violation found.
///
/// `Display` renders the diagnostic line recorded in the run statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub row_number: usize,
    /// Column name as it appears in the input header.
    pub column: String,
    pub value: Value,
    pub rule: ViolatedRule,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row {}: Invalid {} value '{}' ({}). Skipping row.",
            self.row_number, self.column, self.value, self.rule
        )
    }
}
