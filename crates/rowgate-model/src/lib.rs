//! Shared data model for the rowgate validate-then-load pipeline.
//!
//! - [`RawDataset`]: loaded, unvalidated records with typed columns
//! - [`RuleSet`] / [`FieldRule`]: schema and per-field rules
//! - [`AcceptedRow`] / [`Rejection`]: row-level outcomes
//! - [`RunStats`] / [`StatsAggregator`]: per-run summary

pub mod dataset;
pub mod error;
pub mod row;
pub mod rules;
pub mod stats;
pub mod value;

pub use dataset::{Column, ColumnType, RawDataset};
pub use error::{ModelError, Result};
pub use row::{AcceptedRow, HEADER_OFFSET, Rejection, ViolatedRule, row_number};
pub use rules::{
    Constraint, FieldRule, MissingPolicy, RequiredColumn, RuleSet, Schema, TypeClass,
};
pub use stats::{RunStage, RunStats, StatsAggregator};
pub use value::{Value, format_numeric};
