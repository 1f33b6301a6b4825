use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors from running a constraint check or writing its report.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("column not found: {column}")]
    ColumnNotFound { column: String },

    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, ValidateError>;
