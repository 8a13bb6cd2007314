use error_stack::{report, ResultExt};
use regex::Regex;
use thiserror::Error;

/// Credentials and target document for the sheets adapter.
///
/// `priv_key` is the path to a Google service account key file (JSON).
#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    pub priv_key: Box<str>,
    pub spreadsheet_id: Box<str>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file")]
    ReadError,
    #[error("Config file is missing required fields")]
    DeserializeError,
    #[error("Not a Google Sheets document URL: {0}")]
    InvalidSpreadsheetUrl(String),
}

impl SpreadsheetConfig {
    pub fn new(priv_key: impl Into<Box<str>>, spreadsheet_id: impl Into<Box<str>>) -> Self {
        SpreadsheetConfig {
            priv_key: priv_key.into(),
            spreadsheet_id: spreadsheet_id.into(),
        }
    }

    /// Loads the `[sheets]` table from the config file named by
    /// `CONFIG_PATH` (default `Config`).
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "Config".to_string());
        let config = config::Config::builder()
            .add_source(config::File::with_name(&config_path))
            .build()
            .change_context(ConfigError::ReadError)
            .attach_printable_lazy(|| format!("config path: {}", config_path))?;

        config
            .get::<SpreadsheetConfig>("sheets")
            .change_context(ConfigError::DeserializeError)
    }
}

/// Extracts the spreadsheet ID from a document URL like
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`, so documents can
/// be addressed by URL as well as by opaque ID.
pub fn spreadsheet_id_from_url(url: &str) -> error_stack::Result<String, ConfigError> {
    let pattern =
        Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").expect("hardcoded regex is valid");

    pattern
        .captures(url)
        .map(|captures| captures[1].to_owned())
        .ok_or_else(|| report!(ConfigError::InvalidSpreadsheetUrl(url.to_owned())))
}
