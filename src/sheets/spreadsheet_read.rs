use std::future::Future;

use error_stack::ResultExt;
use serde_json::Value;
use tracing::instrument;

use crate::domain::record::{records_from_rows, Record};

use super::spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError};

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn rows_to_strings(rows: Vec<Vec<Value>>) -> Vec<Vec<String>> {
    rows.into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect()
}

pub trait SpreadsheetRead {
    /// Reads a whole worksheet as records: the service-typed grid is fetched
    /// in one call, the first row is taken as the header and every later row
    /// is zipped against it positionally.
    fn read_records(
        &self,
        title: &str,
    ) -> impl Future<Output = error_stack::Result<Vec<Record>, SpreadsheetManagerError>> + Send;

    /// Same result as [`Self::read_records`] for well-formed sheets, but
    /// built from raw strings: row 1 is fetched explicitly as the header,
    /// then all rows below it. Short rows leave keys absent, long rows drop
    /// excess values, duplicate header names collapse last-value-wins.
    fn read_records_raw(
        &self,
        title: &str,
    ) -> impl Future<Output = error_stack::Result<Vec<Record>, SpreadsheetManagerError>> + Send;
}

impl SpreadsheetManager {
    async fn fetch_rows(
        &self,
        range: &str,
        value_render_option: &str,
    ) -> error_stack::Result<Vec<Vec<String>>, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range)
            .value_render_option(value_render_option)
            .major_dimension("ROWS")
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("range: {}", range))?;

        Ok(rows_to_strings(response.1.values.unwrap_or_default()))
    }
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument]
    async fn read_records(
        &self,
        title: &str,
    ) -> error_stack::Result<Vec<Record>, SpreadsheetManagerError> {
        self.expect_sheet(title).await?;

        let mut rows = self
            .fetch_rows(&format!("'{}'", title), "UNFORMATTED_VALUE")
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let header = rows.remove(0);
        Ok(records_from_rows(&header, rows))
    }

    #[instrument]
    async fn read_records_raw(
        &self,
        title: &str,
    ) -> error_stack::Result<Vec<Record>, SpreadsheetManagerError> {
        self.expect_sheet(title).await?;

        // First row is the header
        let header = self
            .fetch_rows(&format!("'{}'!1:1", title), "FORMATTED_VALUE")
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();

        if header.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self
            .fetch_rows(&format!("'{}'", title), "FORMATTED_VALUE")
            .await?
            .into_iter()
            .skip(1);

        Ok(records_from_rows(&header, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_to_string_passes_strings_through() {
        assert_eq!(cell_to_string(Value::String("abc".into())), "abc");
    }

    #[test]
    fn test_cell_to_string_stringifies_scalars() {
        assert_eq!(cell_to_string(Value::from(42)), "42");
        assert_eq!(cell_to_string(Value::Bool(true)), "true");
    }

    #[test]
    fn test_rows_to_strings() {
        let rows = vec![vec![Value::String("a".into()), Value::from(1)]];
        assert_eq!(rows_to_strings(rows), vec![vec!["a".to_owned(), "1".to_owned()]]);
    }
}
