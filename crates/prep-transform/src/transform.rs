//! Feature transformation: standardized numeric columns followed by one-hot
//! indicator columns.

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, info};

use prep_common::unique_names;
use prep_model::ZeroVariancePolicy;

use crate::encode::OneHotEncoder;
use crate::error::Result;
use crate::scale::StandardScaler;

/// Builds the model-ready frame from `data` without modifying it.
///
/// Numeric columns come first in their original order, scaled; then the
/// indicator columns of each categorical column, in original column order.
/// Row order is preserved. An indicator whose `<column>_<value>` name is
/// already taken gets a `.1`, `.2`, ... suffix.
pub fn transform_data(data: &DataFrame, policy: ZeroVariancePolicy) -> Result<DataFrame> {
    let start = Instant::now();
    let scaler = StandardScaler::new(policy).fit(data)?;
    let encoder = OneHotEncoder.fit(data)?;
    for stats in scaler.stats() {
        debug!(column = %stats.column, mean = stats.mean, std = stats.std, "fitted scaler column");
    }

    let mut columns = scaler.transform(data)?;
    let numeric = columns.len();
    columns.extend(encoder.transform(data)?);
    let names = unique_names(columns.iter().map(|column| column.name().to_string()));
    for (column, name) in columns.iter_mut().zip(names) {
        if column.name().as_str() != name {
            debug!(from = %column.name(), to = %name, "renamed clashing output column");
            column.rename(name.into());
        }
    }
    let transformed = DataFrame::new(columns)?;

    info!(
        rows = transformed.height(),
        numeric_columns = numeric,
        zero_variance_columns = scaler.stats().iter().filter(|stats| stats.constant).count(),
        categorical_columns = encoder.levels().len(),
        output_columns = transformed.width(),
        duration_ms = start.elapsed().as_millis(),
        "transformed dataset"
    );
    Ok(transformed)
}
