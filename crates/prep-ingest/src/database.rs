//! SQL query loading.
//!
//! SQLite is the supported driver. Connection strings follow the SQLAlchemy
//! convention (`sqlite://` for memory, `sqlite:///relative.db`,
//! `sqlite:////absolute/path.db`). The short forms `sqlite:<path>`,
//! `sqlite::memory:` and a bare filesystem path also work.

use std::path::PathBuf;
use std::time::Instant;

use polars::prelude::DataFrame;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

use prep_common::unique_names;
use prep_model::CellValue;

use crate::error::{IngestError, Result};
use crate::frame::frame_from_rows;

/// A parsed database connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// Private in-memory database.
    Memory,
    /// SQLite file opened read-only.
    File(PathBuf),
}

impl DatabaseTarget {
    /// Parses a connection string.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use prep_ingest::DatabaseTarget;
    ///
    /// assert_eq!(DatabaseTarget::parse("sqlite://").unwrap(), DatabaseTarget::Memory);
    /// assert_eq!(
    ///     DatabaseTarget::parse("sqlite:///data/app.db").unwrap(),
    ///     DatabaseTarget::File(PathBuf::from("data/app.db"))
    /// );
    /// assert!(DatabaseTarget::parse("postgresql://localhost/app").is_err());
    /// ```
    pub fn parse(connection: &str) -> Result<Self> {
        let trimmed = connection.trim();
        let unsupported = || IngestError::UnsupportedDatabase {
            connection: connection.to_string(),
        };

        let location = if let Some(rest) = trimmed.strip_prefix("sqlite://") {
            if rest.is_empty() {
                return Ok(Self::Memory);
            }
            // A host component is not meaningful for SQLite.
            rest.strip_prefix('/').ok_or_else(unsupported)?
        } else if trimmed.contains("://") {
            return Err(unsupported());
        } else if let Some(rest) = trimmed.strip_prefix("sqlite:") {
            rest
        } else {
            trimmed
        };

        match location {
            "" => Err(unsupported()),
            ":memory:" => Ok(Self::Memory),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }

    fn open(&self) -> Result<Connection> {
        let conn = match self {
            Self::Memory => Connection::open_in_memory()?,
            Self::File(path) => Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?,
        };
        Ok(conn)
    }
}

fn sql_cell(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Missing,
        ValueRef::Integer(v) => CellValue::Integer(v),
        ValueRef::Real(v) => CellValue::Float(v),
        ValueRef::Text(bytes) => CellValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => CellValue::Text(hex::encode(bytes)),
    }
}

/// Runs `query` against the database named by `connection_string` and
/// materializes the result set. Result columns become DataFrame columns.
pub fn load_database(connection_string: &str, query: &str) -> Result<DataFrame> {
    let start = Instant::now();
    let target = DatabaseTarget::parse(connection_string)?;
    debug!(target = ?target, "opening database");
    let conn = target.open()?;

    let mut stmt = conn.prepare(query)?;
    let column_count = stmt.column_count();
    let columns = unique_names(stmt.column_names().into_iter().map(String::from));

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    let mut result_rows = stmt.query([])?;
    while let Some(row) = result_rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            values.push(sql_cell(row.get_ref(idx)?));
        }
        rows.push(values);
    }

    let df = frame_from_rows(&columns, &rows)?;
    info!(
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "loaded query result"
    );
    Ok(df)
}
