pub mod sheets_config;

pub use sheets_config::SpreadsheetConfig;
