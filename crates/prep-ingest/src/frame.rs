//! DataFrame construction from loader rows.
//!
//! Spreadsheet, JSON and SQL loaders all produce rows of [`CellValue`]; this
//! module infers one dtype per column and builds the Polars frame.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use prep_model::CellValue;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InferredType {
    Integer,
    Float,
    Text,
}

fn infer_type(cells: &[&CellValue]) -> InferredType {
    let mut inferred: Option<InferredType> = None;
    for cell in cells {
        let next = match cell {
            CellValue::Missing => continue,
            CellValue::Integer(_) => InferredType::Integer,
            CellValue::Float(_) => InferredType::Float,
            CellValue::Text(_) => return InferredType::Text,
        };
        inferred = Some(match (inferred, next) {
            (None, next) => next,
            (Some(InferredType::Integer), InferredType::Integer) => InferredType::Integer,
            _ => InferredType::Float,
        });
    }
    inferred.unwrap_or(InferredType::Text)
}

fn build_column(name: &str, cells: &[&CellValue]) -> Column {
    match infer_type(cells) {
        InferredType::Integer => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Integer(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values).into()
        }
        InferredType::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(|cell| cell.as_f64()).collect();
            Series::new(name.into(), values).into()
        }
        InferredType::Text => {
            let values: Vec<Option<String>> = cells.iter().map(|cell| cell.to_text()).collect();
            Series::new(name.into(), values).into()
        }
    }
}

/// Build a DataFrame from named columns and rows of cells.
///
/// Each column gets Int64 when every present cell is an integer, Float64 when
/// cells mix integers and floats, and String otherwise. Rows shorter than the
/// header are padded with missing cells.
pub fn frame_from_rows(columns: &[String], rows: &[Vec<CellValue>]) -> Result<DataFrame> {
    let missing = CellValue::Missing;
    let mut built: Vec<Column> = Vec::with_capacity(columns.len());
    for (col_idx, name) in columns.iter().enumerate() {
        let cells: Vec<&CellValue> = rows
            .iter()
            .map(|row| row.get(col_idx).unwrap_or(&missing))
            .collect();
        built.push(build_column(name, &cells));
    }
    Ok(DataFrame::new(built)?)
}
