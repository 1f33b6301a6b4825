//! Data model shared by the tabprep crates.
//!
//! - [`CellValue`]: loader-side cell representation
//! - [`DataSource`]: the supported source kinds
//! - [`DomainConstraint`]: permitted values for a column
//! - [`AnalysisOptions`]: knobs for the cleaning/transform pipeline

pub mod cell;
pub mod constraint;
pub mod options;
pub mod source;

pub use cell::CellValue;
pub use constraint::DomainConstraint;
pub use options::{AnalysisOptions, SortOrder, SortSpec, SpellingOptions, ZeroVariancePolicy};
pub use source::DataSource;
