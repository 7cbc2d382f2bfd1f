//! Run statistics.

use serde::{Deserialize, Serialize};

use crate::row::Rejection;

/// How far a run got before its statistics were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    /// Validation finished; nothing was written.
    Validated,
    /// Accepted rows were committed to the destination.
    Persisted,
}

/// Summary of one pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub total_rows: usize,
    pub inserted_rows: usize,
    pub skipped_rows: usize,
    /// One diagnostic per rejected row, in row order.
    pub warnings: Vec<String>,
    pub stage: RunStage,
}

impl RunStats {
    pub fn is_persisted(&self) -> bool {
        self.stage == RunStage::Persisted
    }

    /// Rows that passed validation, whether or not they were written.
    pub fn accepted_rows(&self) -> usize {
        self.total_rows - self.skipped_rows
    }
}

/// Accumulates counts and diagnostics as the pipeline advances.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    total_rows: usize,
    skipped_rows: usize,
    inserted_rows: usize,
    warnings: Vec<String>,
    persisted: bool,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the number of loaded records.
    pub fn loaded(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
    }

    /// Records rejected rows; diagnostics keep the order given.
    pub fn rejected<'a>(&mut self, rejections: impl IntoIterator<Item = &'a Rejection>) {
        for rejection in rejections {
            self.skipped_rows += 1;
            self.warnings.push(rejection.to_string());
        }
    }

    /// Records the count of rows committed by the sink.
    pub fn persisted(&mut self, inserted_rows: usize) {
        self.inserted_rows = inserted_rows;
        self.persisted = true;
    }

    pub fn finish(self) -> RunStats {
        RunStats {
            total_rows: self.total_rows,
            inserted_rows: self.inserted_rows,
            skipped_rows: self.skipped_rows,
            warnings: self.warnings,
            stage: if self.persisted {
                RunStage::Persisted
            } else {
                RunStage::Validated
            },
        }
    }
}
