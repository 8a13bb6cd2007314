//! Synthetic personal records, written to and read back from Google Sheets.
//!
//! [`generator`] produces fake person records; [`sheets`] maps uniform
//! record batches onto rectangular cell ranges of one spreadsheet document
//! (and back), plus worksheet management and clearing. [`domain`] holds the
//! pure types: ordered records, grid addressing, A1 notation.

pub mod config;
pub mod domain;
pub mod generator;
pub mod sheets;

pub use config::SpreadsheetConfig;
pub use domain::record::Record;
pub use sheets::prelude::*;
