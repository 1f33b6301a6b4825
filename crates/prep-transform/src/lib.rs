//! Cleaning and feature transforms for tabular datasets.
//!
//! # Overview
//!
//! - [`clean_data`]: drop duplicate and incomplete rows, normalize text
//! - [`SpellChecker`]: dictionary-based token correction used by the cleaner
//! - [`sort_data`]: stable single-column sort
//! - [`transform_data`]: standardize numeric columns and one-hot encode the rest
//!
//! The scaler and encoder are exposed separately ([`StandardScaler`],
//! [`OneHotEncoder`]) with an explicit fit/transform split.

mod clean;
mod encode;
mod error;
mod kind;
mod scale;
mod sort;
mod spelling;
mod transform;

pub use clean::{clean_data, drop_duplicate_rows, drop_incomplete_rows, normalize_text};
pub use encode::{CategoryLevels, FittedOneHot, OneHotEncoder};
pub use error::{Result, TransformError};
pub use kind::{ColumnKind, columns_of_kind};
pub use scale::{ColumnStats, FittedScaler, StandardScaler};
pub use sort::{sort_by, sort_data};
pub use spelling::SpellChecker;
pub use transform::transform_data;
