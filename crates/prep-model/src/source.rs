//! Supported data sources.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the input dataset comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Local delimited text file.
    Csv,
    /// Local spreadsheet workbook.
    Excel,
    /// HTTP endpoint returning `{"data": [...]}`.
    Api,
    /// SQL query against a database.
    Database,
}

impl DataSource {
    /// Parse a source name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "excel" => Some(Self::Excel),
            "api" => Some(Self::Api),
            "database" => Some(Self::Database),
            _ => None,
        }
    }

    /// Command-line name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::Api => "api",
            Self::Database => "database",
        }
    }

    /// Whether the source needs a query argument in addition to its location.
    pub const fn requires_query(&self) -> bool {
        matches!(self, Self::Database)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
