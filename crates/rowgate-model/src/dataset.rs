//! Loaded tabular input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Type class of a loaded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Boolean,
    /// Every value in the column is missing.
    Null,
}

impl ColumnType {
    /// Integer, float and all-missing columns satisfy the numeric type class.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Null)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Column declaration taken from the header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: ColumnType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// Unvalidated input rows sharing the column set of the header.
///
/// Every record holds exactly one value per column, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataset {
    columns: Vec<Column>,
    records: Vec<Vec<Value>>,
}

impl RawDataset {
    /// Builds a dataset, padding short records with nulls and truncating long ones.
    pub fn new(columns: Vec<Column>, records: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let records = records
            .into_iter()
            .map(|mut record| {
                record.resize(width, Value::Null);
                record
            })
            .collect();
        Self { columns, records }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn records(&self) -> &[Vec<Value>] {
        &self.records
    }

    /// Number of records (the header is not counted).
    pub fn height(&self) -> usize {
        self.records.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Iterates the values of one column in record order.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.records.iter().filter_map(move |record| record.get(index))
    }
}
