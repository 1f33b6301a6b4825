//! Shared utilities for tabprep crates.
//!
//! Everything here operates on Polars values and dtypes so that the ingest,
//! transform and validate crates agree on what "missing", "numeric" and the
//! textual form of a cell mean, and on how clashing column names are resolved.

mod names;
mod values;

pub use names::unique_names;
pub use values::{any_to_string, format_numeric, is_missing, is_numeric_dtype, row_values};
