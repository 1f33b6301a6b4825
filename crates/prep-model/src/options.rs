//! Pipeline options.
//!
//! Sort column and domain constraint are configurable from a config file or
//! CLI flags. Defaults: sort by `name` ascending and check `some_column`
//! against `Value1`, `Value2`, `Value3`.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constraint::DomainConstraint;

/// Default column the cleaned dataset is ordered by.
pub const DEFAULT_SORT_COLUMN: &str = "name";

/// Default column checked against [`DEFAULT_VALID_VALUES`].
pub const DEFAULT_CONSTRAINT_COLUMN: &str = "some_column";

/// Default permitted values for [`DEFAULT_CONSTRAINT_COLUMN`].
pub const DEFAULT_VALID_VALUES: [&str; 3] = ["Value1", "Value2", "Value3"];

/// Default maximum edit distance for spelling corrections.
pub const DEFAULT_MAX_EDIT_DISTANCE: usize = 2;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => f.write_str("ascending"),
            Self::Descending => f.write_str("descending"),
        }
    }
}

/// Column and direction used to order the cleaned dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }
}

/// What standardization does with a numeric column whose variance is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroVariancePolicy {
    /// Subtract the mean and divide by 1.0, yielding a column of zeros.
    #[default]
    Center,
    /// Leave the column exactly as it was.
    Skip,
}

/// Spelling-correction settings for the cleaner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellingOptions {
    /// Run spelling correction on text cells.
    pub enabled: bool,
    /// Word list to use instead of the built-in English dictionary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PathBuf>,
    /// Largest edit distance accepted for a correction.
    pub max_distance: usize,
}

impl Default for SpellingOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            dictionary: None,
            max_distance: DEFAULT_MAX_EDIT_DISTANCE,
        }
    }
}

/// Options for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Sort applied to the cleaned dataset when its column exists.
    pub sort: Option<SortSpec>,
    /// Constraint reported on when its column exists.
    pub constraint: Option<DomainConstraint>,
    pub spelling: SpellingOptions,
    pub zero_variance: ZeroVariancePolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sort: Some(SortSpec::new(DEFAULT_SORT_COLUMN, SortOrder::Ascending)),
            constraint: Some(DomainConstraint::new(
                DEFAULT_CONSTRAINT_COLUMN,
                DEFAULT_VALID_VALUES,
            )),
            spelling: SpellingOptions::default(),
            zero_variance: ZeroVariancePolicy::default(),
        }
    }
}
