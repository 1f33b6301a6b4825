//! One-hot encoding of categorical columns.

use std::collections::BTreeSet;

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use crate::error::Result;
use crate::kind::{ColumnKind, columns_of_kind};

/// Distinct values observed in one categorical column, sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLevels {
    pub column: String,
    pub categories: Vec<String>,
}

impl CategoryLevels {
    /// Name of the indicator column for `category`.
    pub fn feature_name(&self, category: &str) -> String {
        format!("{}_{}", self.column, category)
    }
}

/// Unfitted one-hot encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneHotEncoder;

impl OneHotEncoder {
    /// Records the distinct values of every categorical column of `df`.
    /// Nulls are not a category.
    pub fn fit(&self, df: &DataFrame) -> Result<FittedOneHot> {
        let mut levels = Vec::new();
        for name in columns_of_kind(df, ColumnKind::Categorical) {
            let categories: BTreeSet<String> = text_values(df.column(&name)?)?
                .into_iter()
                .flatten()
                .collect();
            levels.push(CategoryLevels {
                column: name,
                categories: categories.into_iter().collect(),
            });
        }
        Ok(FittedOneHot { levels })
    }
}

fn text_values(column: &Column) -> Result<Vec<Option<String>>> {
    let cast = column.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Encoder with recorded categories, ready to transform.
#[derive(Debug, Clone)]
pub struct FittedOneHot {
    levels: Vec<CategoryLevels>,
}

impl FittedOneHot {
    pub fn levels(&self) -> &[CategoryLevels] {
        &self.levels
    }

    /// Returns one Float64 indicator column (1.0 / 0.0) per recorded
    /// category, grouped by source column.
    pub fn transform(&self, df: &DataFrame) -> Result<Vec<Column>> {
        let mut encoded = Vec::new();
        for level in &self.levels {
            let values = text_values(df.column(&level.column)?)?;
            for category in &level.categories {
                let indicator: Vec<f64> = values
                    .iter()
                    .map(|value| {
                        if value.as_deref() == Some(category.as_str()) {
                            1.0
                        } else {
                            0.0
                        }
                    })
                    .collect();
                encoded.push(
                    Series::new(level.feature_name(category).into(), indicator).into_column(),
                );
            }
            debug!(
                column = %level.column,
                categories = level.categories.len(),
                "encoded categorical column"
            );
        }
        Ok(encoded)
    }
}
