//! SQLite sink.

use std::path::Path;
use std::time::Instant;

use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, params_from_iter};

use rowgate_model::{AcceptedRow, Column, ColumnType, Value};

use crate::error::{Result, SinkError};
use crate::{Destination, Sink};

/// SQLite column type for a loaded column type.
pub fn sqlite_type(dtype: ColumnType) -> &'static str {
    match dtype {
        ColumnType::Integer | ColumnType::Boolean => "INTEGER",
        ColumnType::Float | ColumnType::Null => "REAL",
        ColumnType::Text => "TEXT",
    }
}

/// Quotes an identifier for use in SQL text.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Int(v) => SqlValue::Integer(*v),
        Value::Float(v) if v.is_nan() => SqlValue::Null,
        Value::Float(v) => SqlValue::Real(*v),
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
    }
}

/// Column names of `table`, or `None` if it does not exist.
fn table_columns(conn: &Connection, table: &str) -> Result<Option<Vec<String>>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_identifier(table)))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(if names.is_empty() { None } else { Some(names) })
}

fn create_table(conn: &Connection, table: &str, columns: &[Column]) -> Result<()> {
    let defs: Vec<String> = columns
        .iter()
        .map(|c| format!("{} {}", quote_identifier(&c.name), sqlite_type(c.dtype)))
        .collect();
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_identifier(table),
            defs.join(", ")
        ),
        [],
    )?;
    Ok(())
}

fn insert_sql(table: &str, columns: &[Column]) -> String {
    let names: Vec<String> = columns.iter().map(|c| quote_identifier(&c.name)).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        names.join(", "),
        placeholders.join(", ")
    )
}

/// Sink writing to one table of a SQLite database file.
///
/// The connection lives as long as the sink and is closed on drop.
pub struct SqliteSink {
    conn: Connection,
    table: String,
}

impl SqliteSink {
    /// Opens (creating if needed) the destination database.
    pub fn open(destination: &Destination) -> Result<Self> {
        check_table_name(&destination.table)?;
        let path = &destination.database;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path).map_err(|source| SinkError::Open {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            conn,
            table: destination.table.clone(),
        })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory(table: &str) -> Result<Self> {
        check_table_name(table)?;
        let conn = Connection::open_in_memory().map_err(|source| SinkError::Open {
            path: Path::new(":memory:").to_path_buf(),
            source,
        })?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    /// Column names of the destination table, `None` before the first write.
    pub fn columns(&self) -> Result<Option<Vec<String>>> {
        table_columns(&self.conn, &self.table)
    }

    /// Number of rows currently stored, 0 if the table does not exist.
    pub fn row_count(&self) -> Result<usize> {
        if self.columns()?.is_none() {
            return Ok(0);
        }
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_identifier(&self.table)),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn check_table_name(table: &str) -> Result<()> {
    if table.trim().is_empty() || table.contains('\0') {
        return Err(SinkError::InvalidTableName {
            table: table.to_string(),
        });
    }
    Ok(())
}

impl Sink for SqliteSink {
    fn append(&mut self, columns: &[Column], rows: &[AcceptedRow]) -> Result<usize> {
        if rows.is_empty() {
            return Ok(0);
        }
        let start = Instant::now();
        let tx = self.conn.transaction()?;

        match table_columns(&tx, &self.table)? {
            None => {
                create_table(&tx, &self.table, columns)?;
                tracing::info!(table = %self.table, columns = columns.len(), "created table");
            }
            Some(existing) => {
                let missing: Vec<String> = columns
                    .iter()
                    .filter(|c| !existing.iter().any(|e| e.eq_ignore_ascii_case(&c.name)))
                    .map(|c| c.name.clone())
                    .collect();
                if !missing.is_empty() {
                    return Err(SinkError::ColumnMismatch {
                        table: self.table.clone(),
                        missing,
                    });
                }
            }
        }

        {
            let mut stmt = tx.prepare(&insert_sql(&self.table, columns))?;
            for row in rows {
                stmt.execute(params_from_iter(row.values.iter().map(to_sql_value)))?;
            }
        }
        tx.commit()?;

        tracing::debug!(
            table = %self.table,
            rows = rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "committed batch"
        );
        Ok(rows.len())
    }
}
