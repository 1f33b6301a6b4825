//! Error types for source loading.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while loading a dataset from a source.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === File Format Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to open or read a spreadsheet.
    #[error("failed to read workbook {path}: {message}")]
    ExcelRead { path: PathBuf, message: String },

    /// Workbook has no worksheet or no header row.
    #[error("workbook has no data: {path}")]
    EmptyWorkbook { path: PathBuf },

    // === API Errors (recoverable "no data") ===
    /// The request did not complete within the timeout.
    #[error("request to {url} timed out after {timeout:?}")]
    ApiTimeout { url: String, timeout: Duration },

    /// The endpoint answered with a status other than 200.
    #[error("request to {url} failed with status code {status}")]
    ApiStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// Connection, DNS or protocol failure.
    #[error("request to {url} failed: {source}")]
    ApiRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Body was not JSON, or lacked a `data` array of objects.
    #[error("unexpected response structure from {url}: {reason}")]
    ApiResponse { url: String, reason: String },

    // === Database Errors ===
    /// Connection string names a driver we cannot open.
    #[error("unsupported database connection string: {connection}")]
    UnsupportedDatabase { connection: String },

    /// Failed to open the database or run the query.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// True for the API failures that mean "the source returned no data"
    /// rather than a broken invocation.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            Self::ApiTimeout { .. }
                | Self::ApiStatus { .. }
                | Self::ApiRequest { .. }
                | Self::ApiResponse { .. }
        )
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, IngestError>;
