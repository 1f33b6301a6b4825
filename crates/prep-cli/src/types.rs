use std::path::PathBuf;

use prep_ingest::IngestError;
use prep_model::DataSource;
use prep_validate::ConstraintReport;
use thiserror::Error;

/// Failures the binary reports with a fixed message and exit code 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unsupported data source: {0}")]
    UnsupportedSource(String),

    #[error("Usage for database: tabprep database <connection_string> <query>")]
    MissingQuery,

    #[error("Failed to load data. Exiting.")]
    LoadFailed(#[source] IngestError),
}

/// Rows and columns of one written artifact.
#[derive(Debug, Clone)]
pub struct ArtifactSummary {
    pub label: &'static str,
    pub rows: usize,
    pub columns: usize,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct RunResult {
    pub source: DataSource,
    pub location: String,
    pub loaded_rows: usize,
    pub loaded_columns: usize,
    pub artifacts: Vec<ArtifactSummary>,
    pub constraint_report: Option<ConstraintReport>,
    pub report_json: Option<PathBuf>,
}
