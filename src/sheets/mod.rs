pub mod auth;
pub mod http_client;
pub mod spreadsheet_manager;
pub mod spreadsheet_read;
pub mod spreadsheet_write;
pub mod value_range_factory;

pub mod prelude {
    pub use super::spreadsheet_manager::{
        SpreadsheetManager, SpreadsheetManagerError, WorksheetInfo, DEFAULT_SHEET_COLS,
        DEFAULT_SHEET_ROWS,
    };
    pub use super::spreadsheet_read::SpreadsheetRead;
    pub use super::spreadsheet_write::{SpreadsheetWrite, WriteMode};
    pub use super::value_range_factory::ValueRangeFactory;
}
