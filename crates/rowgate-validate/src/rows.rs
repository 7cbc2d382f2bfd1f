//! Row-level rule evaluation.
//!
//! Each record is evaluated independently by [`evaluate_row`]; fields are
//! checked in rule order and the first violation rejects the row without
//! checking the remaining fields.

use rowgate_model::{
    AcceptedRow, Constraint, MissingPolicy, RawDataset, Rejection, Value, ViolatedRule, row_number,
};

use crate::schema::Binding;

/// Accepted rows and rejections, both in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowPartition {
    pub accepted: Vec<AcceptedRow>,
    pub rejections: Vec<Rejection>,
}

/// Returns true if a non-missing value satisfies the constraint.
///
/// Integer and float representations of the same number compare equal;
/// text and booleans never satisfy a numeric constraint.
pub fn satisfies(constraint: &Constraint, value: &Value) -> bool {
    match constraint {
        Constraint::OneOf(allowed) => match value {
            Value::Int(v) => allowed.contains(v),
            Value::Float(v) => float_as_exact_i64(*v).is_some_and(|v| allowed.contains(&v)),
            _ => false,
        },
        Constraint::Range { min, max } => value
            .as_f64()
            .is_some_and(|v| v >= *min && v <= *max),
    }
}

/// Integer value of a float with no fractional part, within `i64` range.
fn float_as_exact_i64(v: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    if v.is_finite() && v.fract() == 0.0 && (-LIMIT..LIMIT).contains(&v) {
        Some(v as i64)
    } else {
        None
    }
}

/// Applies every bound rule to one record.
///
/// On success the cleaned record has missing validated fields set to
/// `Value::Null`; every other column passes through unchanged.
pub fn evaluate_row(
    bindings: &[Binding],
    record: &[Value],
    row_number: usize,
) -> Result<AcceptedRow, Rejection> {
    let mut values = record.to_vec();

    for binding in bindings {
        let value = &record[binding.index];
        let reject = |rule: ViolatedRule| Rejection {
            row_number,
            column: binding.column.clone(),
            value: value.clone(),
            rule,
        };

        if value.is_missing() {
            match binding.rule.missing {
                MissingPolicy::NullSubstitute => {
                    values[binding.index] = Value::Null;
                    continue;
                }
                MissingPolicy::Reject => return Err(reject(ViolatedRule::Missing)),
            }
        }

        if let Some(constraint) = &binding.rule.constraint {
            if !satisfies(constraint, value) {
                return Err(reject(ViolatedRule::Constraint(constraint.clone())));
            }
        }
    }

    Ok(AcceptedRow { row_number, values })
}

/// Evaluates every record, keeping input order in both outputs.
pub fn validate_rows(dataset: &RawDataset, bindings: &[Binding]) -> RowPartition {
    dataset
        .records()
        .iter()
        .enumerate()
        .map(|(idx, record)| evaluate_row(bindings, record, row_number(idx)))
        .fold(RowPartition::default(), |mut partition, outcome| {
            match outcome {
                Ok(row) => partition.accepted.push(row),
                Err(rejection) => {
                    tracing::warn!(
                        row = rejection.row_number,
                        column = %rejection.column,
                        rule = %rejection.rule,
                        "row rejected"
                    );
                    partition.rejections.push(rejection);
                }
            }
            partition
        })
}
