//! Integration tests for the SQLite sink.

use rowgate_model::{AcceptedRow, Column, ColumnType, Value};
use rowgate_sink::{Destination, Sink, SinkError, SqliteSink};
use rusqlite::Connection;
use tempfile::tempdir;

fn columns() -> Vec<Column> {
    vec![
        Column::new("Name", ColumnType::Text),
        Column::new("Age", ColumnType::Float),
        Column::new("Survived", ColumnType::Integer),
    ]
}

fn rows() -> Vec<AcceptedRow> {
    vec![
        AcceptedRow {
            row_number: 2,
            values: vec![Value::from("A"), Value::Float(29.0), Value::Int(1)],
        },
        AcceptedRow {
            row_number: 4,
            values: vec![Value::from("C"), Value::Null, Value::Int(1)],
        },
    ]
}

#[test]
fn creates_table_on_first_append() {
    let dir = tempdir().unwrap();
    let destination = Destination::new(dir.path().join("data/sqlite.db"), "titanic");

    let mut sink = SqliteSink::open(&destination).unwrap();
    assert!(sink.columns().unwrap().is_none());
    assert_eq!(sink.append(&columns(), &rows()).unwrap(), 2);
    drop(sink);

    let conn = Connection::open(&destination.database).unwrap();
    let types: Vec<(String, String)> = conn
        .prepare("PRAGMA table_info(\"titanic\")")
        .unwrap()
        .query_map([], |row| Ok((row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        types,
        vec![
            ("Name".to_string(), "TEXT".to_string()),
            ("Age".to_string(), "REAL".to_string()),
            ("Survived".to_string(), "INTEGER".to_string()),
        ]
    );

    let age: Option<f64> = conn
        .query_row("SELECT Age FROM titanic WHERE Name = 'C'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(age, None);
}

#[test]
fn appends_without_deduplication() {
    let dir = tempdir().unwrap();
    let destination = Destination::with_default_table(dir.path().join("sqlite.db"));

    for _ in 0..2 {
        let mut sink = SqliteSink::open(&destination).unwrap();
        sink.append(&columns(), &rows()).unwrap();
    }

    let sink = SqliteSink::open(&destination).unwrap();
    assert_eq!(sink.row_count().unwrap(), 4);
}

#[test]
fn unknown_column_leaves_table_untouched() {
    let mut sink = SqliteSink::open_in_memory("titanic").unwrap();
    sink.append(&columns(), &rows()).unwrap();

    let mut wider = columns();
    wider.push(Column::new("Fare", ColumnType::Float));
    let mut row = rows().remove(0);
    row.values.push(Value::Float(7.25));

    let err = sink.append(&wider, &[row]).unwrap_err();
    match err {
        SinkError::ColumnMismatch { missing, .. } => assert_eq!(missing, vec!["Fare"]),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sink.row_count().unwrap(), 2);
}

#[test]
fn failed_batch_rolls_back() {
    let dir = tempdir().unwrap();
    let destination = Destination::new(dir.path().join("sqlite.db"), "titanic");
    {
        let conn = Connection::open(&destination.database).unwrap();
        conn.execute(
            "CREATE TABLE titanic (Name TEXT, Age REAL NOT NULL, Survived INTEGER)",
            [],
        )
        .unwrap();
    }

    let mut sink = SqliteSink::open(&destination).unwrap();
    let err = sink.append(&columns(), &rows()).unwrap_err();
    assert!(matches!(err, SinkError::Sql(_)));
    assert_eq!(sink.row_count().unwrap(), 0);
}

#[test]
fn matches_existing_columns_case_insensitively() {
    let mut sink = SqliteSink::open_in_memory("passengers").unwrap();
    sink.append(&columns(), &rows()).unwrap();

    let lower: Vec<Column> = columns()
        .into_iter()
        .map(|c| Column::new(c.name.to_lowercase(), c.dtype))
        .collect();
    assert_eq!(sink.append(&lower, &rows()).unwrap(), 2);
    assert_eq!(sink.row_count().unwrap(), 4);
}

#[test]
fn destination_display() {
    let destination = Destination::new("/opt/data/sqlite.db", "titanic");
    assert_eq!(destination.to_string(), "/opt/data/sqlite.db:titanic");
}

#[test]
fn later_batches_follow_sqlite_type_affinity() {
    let dir = tempdir().unwrap();
    let destination = Destination::new(dir.path().join("sqlite.db"), "titanic");
    let columns = vec![Column::new("Age", ColumnType::Integer)];

    let mut sink = SqliteSink::open(&destination).unwrap();
    let ints = vec![AcceptedRow {
        row_number: 2,
        values: vec![Value::Int(30)],
    }];
    sink.append(&columns, &ints).unwrap();

    let floats = vec![AcceptedRow {
        row_number: 2,
        values: vec![Value::Float(29.5)],
    }];
    let float_columns = vec![Column::new("Age", ColumnType::Float)];
    assert_eq!(sink.append(&float_columns, &floats).unwrap(), 1);
    drop(sink);

    let conn = Connection::open(&destination.database).unwrap();
    let stored: Vec<(String, f64)> = conn
        .prepare("SELECT typeof(Age), Age FROM titanic ORDER BY rowid")
        .unwrap()
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        stored,
        vec![("integer".to_string(), 30.0), ("real".to_string(), 29.5)]
    );
}
