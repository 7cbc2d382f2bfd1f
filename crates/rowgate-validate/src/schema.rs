//! Schema presence and type-class checks.
//!
//! Both checks are fatal: a dataset that fails either is rejected as a
//! whole before any row is evaluated.
//!
//! The header itself must also be unambiguous. Two names that differ only
//! in case or surrounding whitespace (`Name` and `name `) are rejected even
//! when no rule refers to them, since they would collide as destination
//! columns.

use rowgate_model::{Column, FieldRule, RawDataset, RuleSet, TypeClass};

use crate::error::{Result, ValidateError};
use crate::util::CaseInsensitiveSet;

/// A field rule resolved against the dataset header.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Column name as spelled in the header, trimmed.
    pub column: String,
    /// Position of the column in each record.
    pub index: usize,
    pub rule: FieldRule,
}

/// Resolved bindings for every rule, in rule order, plus the normalized header.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBindings {
    pub bindings: Vec<Binding>,
    /// Header with surrounding whitespace trimmed from every name.
    pub columns: Vec<Column>,
}

/// Builds the case-insensitive lookup over trimmed header names.
///
/// Fails on any collision, whether or not the column is required.
pub fn build_column_lookup(dataset: &RawDataset) -> Result<CaseInsensitiveSet> {
    let mut lookup = CaseInsensitiveSet::new();
    for (index, column) in dataset.columns().iter().enumerate() {
        if let Some(existing) = lookup.insert(&column.name, index) {
            return Err(ValidateError::DuplicateColumn {
                column: column.name.trim().to_string(),
                existing: existing.to_string(),
            });
        }
    }
    Ok(lookup)
}

/// Resolves every rule's column and checks its type class.
pub fn check_schema(dataset: &RawDataset, rules: &RuleSet) -> Result<ColumnBindings> {
    let lookup = build_column_lookup(dataset)?;
    let columns: Vec<Column> = dataset
        .columns()
        .iter()
        .map(|c| Column::new(c.name.trim(), c.dtype))
        .collect();

    let missing: Vec<String> = rules
        .schema()
        .required
        .iter()
        .filter(|required| !lookup.contains(&required.name))
        .map(|required| required.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(ValidateError::MissingColumns {
            missing,
            available: columns.iter().map(|c| c.name.clone()).collect(),
        });
    }

    let mut bindings = Vec::with_capacity(rules.rules.len());
    for rule in &rules.rules {
        let Some((column, index)) = lookup.get(&rule.column) else {
            continue;
        };
        check_type_class(dataset, index, column, TypeClass::Numeric)?;
        bindings.push(Binding {
            column: column.to_string(),
            index,
            rule: rule.clone(),
        });
    }

    tracing::debug!(
        columns = ?bindings.iter().map(|b| b.column.as_str()).collect::<Vec<_>>(),
        "schema validation passed"
    );
    Ok(ColumnBindings { bindings, columns })
}

/// Checks the declared dtype and every non-missing value of one column.
fn check_type_class(
    dataset: &RawDataset,
    index: usize,
    column: &str,
    type_class: TypeClass,
) -> Result<()> {
    let type_error = |found: &str| ValidateError::ColumnType {
        column: column.to_string(),
        expected: type_class.label(),
        found: found.to_string(),
    };

    match type_class {
        TypeClass::Numeric => {
            let dtype = dataset.columns()[index].dtype;
            if !dtype.is_numeric() {
                return Err(type_error(dtype.label()));
            }
            if let Some(value) = dataset
                .column_values(index)
                .find(|v| !v.is_missing() && !v.is_numeric())
            {
                return Err(type_error(value.type_name()));
            }
        }
    }
    Ok(())
}
