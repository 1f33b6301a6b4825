//! Domain-constraint validation.
//!
//! Checks are diagnostic only: they report rows whose value falls outside a
//! permitted set and never modify the dataset.

mod error;
mod report;

use std::time::Instant;

use polars::prelude::{AnyValue, DataFrame};
use tracing::{info, warn};

use prep_common::{any_to_string, is_missing};
use prep_model::DomainConstraint;

pub use error::{Result, ValidateError};
pub use report::{
    ConstraintReport, ConstraintViolation, write_constraint_report_json,
};

/// Checks every row of `constraint.column` against the permitted values.
///
/// Membership is exact and case-sensitive on the cell's textual form; a
/// missing cell is a violation. The report is logged before it is returned.
pub fn check_domain_constraints(
    data: &DataFrame,
    constraint: &DomainConstraint,
) -> Result<ConstraintReport> {
    let start = Instant::now();
    let column = data
        .column(&constraint.column)
        .map_err(|_| ValidateError::ColumnNotFound {
            column: constraint.column.clone(),
        })?;

    let mut violations = Vec::new();
    for row in 0..data.height() {
        let value = column.get(row).unwrap_or(AnyValue::Null);
        if is_missing(&value) {
            violations.push(ConstraintViolation { row, value: None });
            continue;
        }
        let text = any_to_string(value);
        if !constraint.permits(&text) {
            violations.push(ConstraintViolation {
                row,
                value: Some(text),
            });
        }
    }

    let report = ConstraintReport {
        column: constraint.column.clone(),
        valid_values: constraint.valid_values.iter().cloned().collect(),
        checked_rows: data.height(),
        violations,
    };
    if report.is_clean() {
        info!(
            column = %report.column,
            rows = report.checked_rows,
            duration_ms = start.elapsed().as_millis(),
            "no domain constraint violations"
        );
    } else {
        warn!(
            column = %report.column,
            rows = report.checked_rows,
            violations = report.violation_count(),
            "domain constraint violations found:\n{report}"
        );
    }
    Ok(report)
}
