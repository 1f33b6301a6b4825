//! Error types for the transform crate.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while cleaning, sorting or transforming a dataset.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A named column is not present in the dataset.
    #[error("column not found: {column}")]
    ColumnNotFound { column: String },

    /// Failed to read a spelling dictionary.
    #[error("failed to read dictionary {path}: {source}")]
    DictionaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dictionary line had a count that is not a non-negative integer.
    #[error("invalid dictionary entry on line {line}: {entry:?}")]
    InvalidDictionaryEntry { line: usize, entry: String },

    /// Underlying Polars failure.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

/// Result alias for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
