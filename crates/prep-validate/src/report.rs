//! Constraint report types and their JSON form.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::error::{Result, ValidateError};

const REPORT_SCHEMA: &str = "tabprep.constraint-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

/// One row whose value is not permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintViolation {
    /// Zero-based row position in the checked dataset.
    pub row: usize,
    /// Textual cell value; `None` for a missing cell.
    pub value: Option<String>,
}

/// Outcome of checking one column against its permitted values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintReport {
    pub column: String,
    pub valid_values: Vec<String>,
    pub checked_rows: usize,
    pub violations: Vec<ConstraintViolation>,
}

impl ConstraintReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

impl fmt::Display for ConstraintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(
                f,
                "No domain constraint violations in '{}' ({} rows checked).",
                self.column, self.checked_rows
            );
        }
        writeln!(
            f,
            "Domain constraint violations in '{}': {} of {} rows (allowed: {}).",
            self.column,
            self.violation_count(),
            self.checked_rows,
            self.valid_values.join(", ")
        )?;
        for (idx, violation) in self.violations.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            match &violation.value {
                Some(value) => write!(f, "  row {}: {value}", violation.row)?,
                None => write!(f, "  row {}: <missing>", violation.row)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ConstraintReportPayload<'a> {
    schema: &'static str,
    schema_version: u32,
    generated_at: String,
    #[serde(flatten)]
    report: &'a ConstraintReport,
}

/// Writes `report` as pretty JSON to `path`, creating parent directories.
pub fn write_constraint_report_json(path: &Path, report: &ConstraintReport) -> Result<()> {
    let write_error = |source: std::io::Error| ValidateError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let payload = ConstraintReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        report,
    };
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(path, format!("{json}\n")).map_err(write_error)?;
    Ok(())
}
