//! Row ordering.

use polars::prelude::{DataFrame, SortMultipleOptions};
use tracing::debug;

use prep_model::SortSpec;

use crate::error::{Result, TransformError};

/// Sorts rows by `column_name`. The sort is stable: equal keys keep their
/// relative order. Nulls go last in either direction.
pub fn sort_data(data: &DataFrame, column_name: &str, ascending: bool) -> Result<DataFrame> {
    if data.column(column_name).is_err() {
        return Err(TransformError::ColumnNotFound {
            column: column_name.to_string(),
        });
    }
    let options = SortMultipleOptions::default()
        .with_order_descending(!ascending)
        .with_nulls_last(true)
        .with_maintain_order(true);
    let sorted = data.sort([column_name], options)?;
    debug!(column = column_name, ascending, rows = sorted.height(), "sorted dataset");
    Ok(sorted)
}

/// [`sort_data`] driven by a [`SortSpec`].
pub fn sort_by(data: &DataFrame, spec: &SortSpec) -> Result<DataFrame> {
    sort_data(data, &spec.column, spec.order.is_ascending())
}
