//! Source loaders for tabprep.
//!
//! Every loader turns an external source into a Polars `DataFrame` and
//! reports failure through [`IngestError`]:
//!
//! - **CSV**: [`load_csv`] reads a local delimited file
//! - **Excel**: [`load_excel`] reads the first worksheet of a workbook
//! - **API**: [`load_api`] fetches `{"data": [...]}` from an HTTP endpoint
//! - **Database**: [`load_database`] runs a query against SQLite
//!
//! API failures (timeout, non-200 status, network error, unexpected body) are
//! recoverable "no data" conditions; callers can tell them apart with
//! [`IngestError::is_no_data`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use prep_ingest::{load_csv, load_api};
//!
//! let df = load_csv(Path::new("input.csv"))?;
//! match load_api("https://example.test/rows") {
//!     Ok(df) => println!("{} rows", df.height()),
//!     Err(err) if err.is_no_data() => println!("no data: {err}"),
//!     Err(err) => return Err(err),
//! }
//! ```

mod api;
mod csv;
mod database;
mod error;
mod excel;
mod frame;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loaders ===
pub use api::{ApiOptions, DEFAULT_API_TIMEOUT, frame_from_json, load_api, load_api_with_options};
pub use csv::{CsvOptions, load_csv, load_csv_with_options};
pub use database::{DatabaseTarget, load_database};
pub use excel::load_excel;

// === Frame Construction ===
pub use frame::frame_from_rows;
