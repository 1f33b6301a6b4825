//! Standardization of numeric columns to zero mean and unit variance.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use prep_model::ZeroVariancePolicy;

use crate::error::Result;
use crate::kind::{ColumnKind, columns_of_kind};

/// Mean and population standard deviation of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub mean: f64,
    pub std: f64,
    /// Every present value is identical (or the column is empty).
    pub constant: bool,
}

impl ColumnStats {
    fn from_values(column: &str, values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                column: column.to_string(),
                mean: 0.0,
                std: 0.0,
                constant: true,
            };
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let constant = values.iter().all(|v| *v == values[0]);
        Self {
            column: column.to_string(),
            mean: if constant { values[0] } else { mean },
            std: if constant { 0.0 } else { variance.sqrt() },
            constant,
        }
    }
}

/// Unfitted scaler: decides what happens to zero-variance columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScaler {
    policy: ZeroVariancePolicy,
}

impl StandardScaler {
    pub fn new(policy: ZeroVariancePolicy) -> Self {
        Self { policy }
    }

    /// Computes statistics for every numeric column of `df`. Nulls and NaN
    /// values are ignored.
    pub fn fit(&self, df: &DataFrame) -> Result<FittedScaler> {
        let mut stats = Vec::new();
        for name in columns_of_kind(df, ColumnKind::Numeric) {
            let values = float_values(df.column(&name)?)?;
            let present: Vec<f64> = values.into_iter().flatten().filter(|v| !v.is_nan()).collect();
            stats.push(ColumnStats::from_values(&name, &present));
        }
        Ok(FittedScaler {
            stats,
            policy: self.policy,
        })
    }
}

fn float_values(column: &Column) -> Result<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Scaler with per-column statistics, ready to transform.
#[derive(Debug, Clone)]
pub struct FittedScaler {
    stats: Vec<ColumnStats>,
    policy: ZeroVariancePolicy,
}

impl FittedScaler {
    pub fn stats(&self) -> &[ColumnStats] {
        &self.stats
    }

    /// Returns the scaled columns in fitted order.
    ///
    /// Each becomes Float64 `(x - mean) / std`. A zero-variance column is
    /// centered (divided by 1.0) or returned unchanged, per the policy.
    pub fn transform(&self, df: &DataFrame) -> Result<Vec<Column>> {
        let mut scaled = Vec::with_capacity(self.stats.len());
        for stats in &self.stats {
            let column = df.column(&stats.column)?;
            if stats.constant {
                debug!(column = %stats.column, policy = ?self.policy, "zero-variance column");
                if self.policy == ZeroVariancePolicy::Skip {
                    scaled.push(column.clone());
                    continue;
                }
            }
            let scale = if stats.constant { 1.0 } else { stats.std };
            let values: Vec<Option<f64>> = float_values(column)?
                .into_iter()
                .map(|value| value.map(|v| (v - stats.mean) / scale))
                .collect();
            scaled.push(Series::new(stats.column.as_str().into(), values).into_column());
        }
        Ok(scaled)
    }
}
