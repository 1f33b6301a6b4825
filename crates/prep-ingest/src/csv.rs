//! Delimited text loading.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::info;

use crate::error::{IngestError, Result};

/// Options for reading a delimited file.
#[derive(Debug, Clone, Copy)]
pub struct CsvOptions {
    /// Field separator byte.
    pub separator: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { separator: b',' }
    }
}

impl CsvOptions {
    /// Picks the separator from the file extension: tab for `.tsv`/`.tab`,
    /// comma otherwise.
    pub fn for_path(path: &Path) -> Self {
        let is_tab = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab"));
        if is_tab {
            Self { separator: b'\t' }
        } else {
            Self::default()
        }
    }
}

/// Reads a delimited file with a header row into a DataFrame.
///
/// The separator is chosen from the extension (see [`CsvOptions::for_path`]).
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    load_csv_with_options(path, CsvOptions::for_path(path))
}

/// Reads a delimited file with explicit options.
///
/// The schema is inferred from every row; empty fields are read as nulls.
pub fn load_csv_with_options(path: &Path, options: CsvOptions) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|parse| parse.with_separator(options.separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded delimited file"
    );
    Ok(df)
}
