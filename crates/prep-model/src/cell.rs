//! Loader-side cell values.

use serde::{Deserialize, Serialize};

/// A single cell read from a source before it becomes part of a DataFrame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    /// No value (SQL NULL, JSON null, empty spreadsheet cell).
    #[default]
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Builds a text cell, treating the empty string as missing.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Missing
        } else {
            Self::Text(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Numeric view of the cell, `None` for text and missing cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Missing | Self::Text(_) => None,
        }
    }

    /// Textual view of the cell, `None` for missing cells.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Integer(v) => Some(v.to_string()),
            Self::Float(v) => Some(v.to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}
