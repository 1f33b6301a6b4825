//! Spreadsheet loading via calamine.

use std::path::Path;

use calamine::{Data, ExcelDateTime, Reader, open_workbook_auto};
use chrono::NaiveTime;
use polars::prelude::DataFrame;
use tracing::{debug, info};

use prep_common::unique_names;
use prep_model::CellValue;

use crate::error::{IngestError, Result};
use crate::frame::frame_from_rows;

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn header_name(idx: usize, cell: &Data) -> String {
    let name = match cell {
        Data::Empty => String::new(),
        Data::Float(v) if v.fract() == 0.0 => format!("{}", *v as i64),
        other => other.to_string().trim().to_string(),
    };
    if name.is_empty() {
        format!("Unnamed: {idx}")
    } else {
        name
    }
}

/// ISO text for a date-formatted cell: `2024-01-05`, `2024-01-05 14:30:00`,
/// or `HH:MM:SS` for durations.
fn datetime_text(value: &ExcelDateTime) -> Option<String> {
    if value.is_duration() {
        let seconds = value.as_duration()?.num_seconds();
        return Some(format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            seconds % 3600 / 60,
            seconds % 60
        ));
    }
    let datetime = value.as_datetime()?;
    let text = if datetime.time() == NaiveTime::MIN {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    };
    Some(text)
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(v) => CellValue::Integer(*v),
        Data::Float(v) => CellValue::Float(*v),
        Data::String(s) => CellValue::text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        // Serials outside chrono's range stay numeric.
        Data::DateTime(value) => {
            datetime_text(value).map_or(CellValue::Float(value.as_f64()), CellValue::Text)
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.clone()),
        Data::Empty | Data::Error(_) => CellValue::Missing,
    }
}

/// Reads the first worksheet of a workbook into a DataFrame.
///
/// Leading blank rows are skipped; the first non-blank row is the header.
/// Blank header cells are named `Unnamed: <index>` and repeated names get a
/// numeric suffix.
pub fn load_excel(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let read_error = |message: String| IngestError::ExcelRead {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err(IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        });
    };
    debug!(path = %path.display(), sheet = %sheet, "reading worksheet");
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| read_error(e.to_string()))?;

    let mut rows = range
        .rows()
        .skip_while(|row| row.iter().all(is_blank));
    let Some(header) = rows.next() else {
        return Err(IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        });
    };
    let columns = unique_names(
        header
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_name(idx, cell)),
    );
    let body: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    let df = frame_from_rows(&columns, &body)?;
    info!(
        path = %path.display(),
        sheet = %sheet,
        rows = df.height(),
        columns = df.width(),
        "loaded workbook"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use calamine::ExcelDateTimeType;

    use super::*;

    #[test]
    fn test_cell_value_mapping() {
        assert_eq!(cell_value(&Data::Int(4)), CellValue::Integer(4));
        assert_eq!(cell_value(&Data::Float(1.5)), CellValue::Float(1.5));
        assert_eq!(
            cell_value(&Data::String("x".into())),
            CellValue::Text("x".into())
        );
        assert_eq!(cell_value(&Data::String(String::new())), CellValue::Missing);
        assert_eq!(
            cell_value(&Data::Bool(true)),
            CellValue::Text("true".into())
        );
        assert_eq!(cell_value(&Data::Empty), CellValue::Missing);
    }

    #[test]
    fn test_date_cells_become_iso_text() {
        let date = ExcelDateTime::new(45292.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            cell_value(&Data::DateTime(date)),
            CellValue::Text("2024-01-01".into())
        );
        let stamp = ExcelDateTime::new(45292.5, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            cell_value(&Data::DateTime(stamp)),
            CellValue::Text("2024-01-01 12:00:00".into())
        );
        let duration = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(
            cell_value(&Data::DateTime(duration)),
            CellValue::Text("36:00:00".into())
        );
        assert_eq!(
            cell_value(&Data::DateTimeIso("2024-02-03".into())),
            CellValue::Text("2024-02-03".into())
        );
    }

    #[test]
    fn test_header_names() {
        assert_eq!(header_name(0, &Data::String(" id ".into())), "id");
        assert_eq!(header_name(3, &Data::Empty), "Unnamed: 3");
        assert_eq!(header_name(1, &Data::Float(2024.0)), "2024");
    }

    #[test]
    fn test_missing_workbook() {
        let err = load_excel(Path::new("/no/such/book.xlsx")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn test_not_a_workbook() {
        let mut file = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .unwrap();
        write!(file, "this is not a zip archive").unwrap();

        let err = load_excel(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::ExcelRead { .. }));
    }
}
