//! Polars to row-model conversion.

use polars::prelude::{AnyValue, DataFrame, DataType};
use rowgate_model::{Column, ColumnType, RawDataset, Value};

/// Maps a polars dtype onto a column type class.
pub fn column_type(dtype: &DataType) -> ColumnType {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => ColumnType::Integer,
        DataType::Float32 | DataType::Float64 => ColumnType::Float,
        DataType::Boolean => ColumnType::Boolean,
        DataType::Null => ColumnType::Null,
        _ => ColumnType::Text,
    }
}

/// Converts a polars cell into a [`Value`].
pub fn any_to_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Int8(v) => Value::Int(i64::from(v)),
        AnyValue::Int16(v) => Value::Int(i64::from(v)),
        AnyValue::Int32(v) => Value::Int(i64::from(v)),
        AnyValue::Int64(v) => Value::Int(v),
        AnyValue::UInt8(v) => Value::Int(i64::from(v)),
        AnyValue::UInt16(v) => Value::Int(i64::from(v)),
        AnyValue::UInt32(v) => Value::Int(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Value::Float(v as f64), Value::Int),
        AnyValue::Float32(v) => Value::Float(f64::from(v)).normalized(),
        AnyValue::Float64(v) => Value::Float(v).normalized(),
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::String(s) => Value::Text(s.to_string()),
        AnyValue::StringOwned(s) => Value::Text(s.to_string()),
        other => Value::Text(other.to_string()),
    }
}

/// Copies a DataFrame into a [`RawDataset`], keeping column and row order.
pub fn dataframe_to_dataset(df: &DataFrame) -> RawDataset {
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .map(|col| {
            let name = col.name().as_str().trim_start_matches('\u{feff}');
            // The CSV reader infers all-empty columns as strings.
            let dtype = if col.len() > 0 && col.null_count() == col.len() {
                ColumnType::Null
            } else {
                column_type(col.dtype())
            };
            Column::new(name, dtype)
        })
        .collect();

    let records = (0..df.height())
        .map(|idx| {
            df.get_columns()
                .iter()
                .map(|col| any_to_value(col.get(idx).unwrap_or(AnyValue::Null)))
                .collect()
        })
        .collect();

    RawDataset::new(columns, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn maps_numeric_dtypes() {
        assert_eq!(column_type(&DataType::Int64), ColumnType::Integer);
        assert_eq!(column_type(&DataType::UInt8), ColumnType::Integer);
        assert_eq!(column_type(&DataType::Float64), ColumnType::Float);
        assert_eq!(column_type(&DataType::String), ColumnType::Text);
        assert_eq!(column_type(&DataType::Boolean), ColumnType::Boolean);
    }

    #[test]
    fn nan_becomes_null() {
        assert_eq!(any_to_value(AnyValue::Float64(f64::NAN)), Value::Null);
        assert_eq!(any_to_value(AnyValue::Float64(1.5)), Value::Float(1.5));
        assert_eq!(any_to_value(AnyValue::UInt64(u64::MAX)), Value::Float(u64::MAX as f64));
    }

    #[test]
    fn converts_frame_row_major() {
        let df = DataFrame::new(vec![
            Series::new("name".into(), vec!["A", "B"]).into_column(),
            Series::new("age".into(), vec![Some(29.0), None]).into_column(),
        ])
        .unwrap();

        let ds = dataframe_to_dataset(&df);
        assert_eq!(ds.column_names(), vec!["name", "age"]);
        assert_eq!(ds.columns()[1].dtype, ColumnType::Float);
        assert_eq!(ds.records()[0], vec![Value::from("A"), Value::Float(29.0)]);
        assert_eq!(ds.records()[1], vec![Value::from("B"), Value::Null]);
    }

    #[test]
    fn all_missing_column_is_null_typed() {
        let df = DataFrame::new(vec![
            Series::new("name".into(), vec!["A", "B"]).into_column(),
            Series::new("age".into(), vec![None::<&str>, None]).into_column(),
        ])
        .unwrap();

        let ds = dataframe_to_dataset(&df);
        assert_eq!(ds.columns()[0].dtype, ColumnType::Text);
        assert_eq!(ds.columns()[1].dtype, ColumnType::Null);
    }
}
