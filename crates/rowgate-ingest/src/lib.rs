//! Input loading for rowgate.
//!
//! Parses delimited text with a header row into a [`RawDataset`] with typed
//! columns. Types are inferred per column by the polars CSV reader over the
//! whole input; the standard NA tokens (`NA`, `NaN`, `NULL`, ...) and empty
//! cells are read as missing values.
//!
//! Any failure here is fatal for the run.
//!
//! # Example
//!
//! ```ignore
//! use rowgate_ingest::{LoadOptions, Source, load_dataset};
//!
//! let dataset = load_dataset(&Source::Path("titanic.csv".into()), &LoadOptions::default())?;
//! println!("{} rows", dataset.height());
//! ```

mod convert;
mod csv;
mod error;
mod source;

use std::time::Instant;

use rowgate_model::RawDataset;

// === Error Types ===
pub use error::{IngestError, Result};

// === Sources ===
pub use source::{BUFFER_LABEL, DEFAULT_NULL_VALUES, LoadOptions, MAX_CSV_FILE_SIZE, Source};

// === CSV Reading ===
pub use csv::{
    check_file_size, check_file_size_with_limit, read_csv_bytes, read_csv_path,
    validate_dataframe_shape,
};

// === Conversion ===
pub use convert::{any_to_value, column_type, dataframe_to_dataset};

/// Loads a source into a [`RawDataset`].
pub fn load_dataset(source: &Source, options: &LoadOptions) -> Result<RawDataset> {
    let start = Instant::now();
    let df = match source {
        Source::Path(path) => read_csv_path(path, options)?,
        Source::Bytes(bytes) => read_csv_bytes(bytes, options)?,
    };
    let dataset = dataframe_to_dataset(&df);
    tracing::debug!(
        input = %source.label(),
        rows = dataset.height(),
        columns = dataset.width(),
        duration_ms = start.elapsed().as_millis(),
        "loaded dataset"
    );
    Ok(dataset)
}
