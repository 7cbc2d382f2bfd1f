//! CSV reading into polars DataFrames.

use std::borrow::Cow;
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, NullValues, SerReader};

use crate::error::{IngestError, Result};
use crate::source::{BUFFER_LABEL, LoadOptions, MAX_CSV_FILE_SIZE};

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<u64> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit. Returns the size in bytes.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(metadata.len())
}

/// Rejects UTF-16 byte order marks. A UTF-8 BOM is accepted.
fn check_bom(prefix: &[u8], input: &str) -> Result<()> {
    if prefix.len() >= 2 {
        if prefix[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                input: input.to_string(),
                encoding: "UTF-16 LE",
            });
        }
        if prefix[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                input: input.to_string(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Splits delimited text into records. Newlines inside quoted fields do not
/// end a record; each slice keeps its line terminator.
fn split_records(body: &[u8]) -> Vec<&[u8]> {
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (idx, byte) in body.iter().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                records.push(&body[start..=idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if start < body.len() {
        records.push(&body[start..]);
    }
    records
}

fn is_blank(record: &[u8]) -> bool {
    record
        .iter()
        .all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}

/// Header cells of a single header record, read as text.
fn header_names(header: &[u8], input: &str) -> Result<Vec<String>> {
    let df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(header.to_vec()))
        .finish()
        .map_err(|e| parse_error(input, e))?;
    Ok(df
        .get_columns()
        .iter()
        .map(|col| match col.get(0) {
            Ok(AnyValue::String(s)) => s.to_string(),
            Ok(AnyValue::StringOwned(s)) => s.to_string(),
            _ => String::new(),
        })
        .collect())
}

fn check_duplicate_header(header: &[u8], input: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for name in header_names(header, input)? {
        if !name.is_empty() && !seen.insert(name.clone()) {
            return Err(IngestError::DuplicateColumnName {
                input: input.to_string(),
                column: name,
            });
        }
    }
    Ok(())
}

/// Drops blank lines and checks the header row.
///
/// A blank line is not a record; a line of empty fields (`,,`) is.
fn prepare_body<'a>(body: &'a [u8], input: &str) -> Result<Cow<'a, [u8]>> {
    let records = split_records(body);
    let kept: Vec<&[u8]> = records.iter().copied().filter(|r| !is_blank(r)).collect();
    let Some(header) = kept.first() else {
        return Err(IngestError::EmptyDataset {
            input: input.to_string(),
        });
    };
    check_duplicate_header(header, input)?;

    if kept.len() == records.len() {
        Ok(Cow::Borrowed(body))
    } else {
        tracing::debug!(
            input,
            blank_lines = records.len() - kept.len(),
            "skipped blank lines"
        );
        Ok(Cow::Owned(kept.concat()))
    }
}

/// Validate DataFrame shape after loading.
///
/// Checks for:
/// - Empty DataFrame (no rows)
/// - Empty column names
/// - Warns about wide datasets (>500 columns)
pub fn validate_dataframe_shape(df: &DataFrame, input: &str) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyDataset {
            input: input.to_string(),
        });
    }

    if df.width() > 500 {
        tracing::warn!(
            input,
            columns = df.width(),
            "Dataset has more than 500 columns - may impact performance"
        );
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                input: input.to_string(),
            });
        }
    }

    Ok(())
}

fn csv_options(options: &LoadOptions) -> CsvReadOptions {
    let null_values = NullValues::AllColumns(
        options
            .null_values
            .iter()
            .map(|token| token.as_str().into())
            .collect(),
    );
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length)
        .map_parse_options(|parse| parse.with_null_values(Some(null_values.clone())))
}

fn parse_error(input: &str, e: impl ToString) -> IngestError {
    IngestError::CsvParse {
        input: input.to_string(),
        message: e.to_string(),
    }
}

fn read_csv_body(bytes: &[u8], options: &LoadOptions, input: &str) -> Result<DataFrame> {
    check_bom(bytes, input)?;
    let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
    let body = prepare_body(body, input)?;

    let df = csv_options(options)
        .into_reader_with_file_handle(Cursor::new(body.into_owned()))
        .finish()
        .map_err(|e| parse_error(input, e))?;

    validate_dataframe_shape(&df, input)?;
    Ok(df)
}

/// Reads a CSV file with a header row into a DataFrame.
pub fn read_csv_path(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    check_file_size_with_limit(path, options.max_file_size)?;
    let bytes = std::fs::read(path).map_err(|e| open_error(path, e))?;
    read_csv_body(&bytes, options, &path.display().to_string())
}

/// Reads an in-memory CSV payload with a header row into a DataFrame.
pub fn read_csv_bytes(bytes: &[u8], options: &LoadOptions) -> Result<DataFrame> {
    read_csv_body(bytes, options, BUFFER_LABEL)
}
