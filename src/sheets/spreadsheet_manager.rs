use std::fmt::Debug;

use error_stack::{report, ResultExt};
use google_sheets4::{
    api::{
        AddSheetRequest, BatchUpdateSpreadsheetRequest, ClearValuesRequest, DeleteSheetRequest,
        DimensionRange, GridProperties, InsertDimensionRequest, Request, SheetProperties,
        Spreadsheet, ValueRange,
    },
    Sheets,
};
use thiserror::Error;
use tracing::instrument;

use crate::config::sheets_config::SpreadsheetConfig;
use crate::domain::{
    a1_notation::{A1Notation, FromA1Notation, ToA1Notation},
    cell_position::CellPosition,
    cell_range::CellRange,
    row::Row,
};

use super::{auth, http_client, value_range_factory::ValueRangeFactory};

pub(super) type SheetsHub = Sheets<
    google_sheets4::hyper_rustls::HttpsConnector<google_sheets4::hyper::client::HttpConnector>,
>;

/// Capacity of auto-created worksheets.
pub const DEFAULT_SHEET_ROWS: u32 = 100;
pub const DEFAULT_SHEET_COLS: u32 = 20;

/// Stateless handle to one spreadsheet document. Every operation is a
/// round trip against the Sheets API; nothing is cached between calls.
pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    pub(super) hub: SheetsHub,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Authentication against the sheets service failed")]
    AuthenticationFailed,
    #[error("Worksheet '{0}' not found")]
    WorksheetNotFound(String),
    #[error("Invalid record batch")]
    InvalidRecordBatch,
    #[error("Invalid range reference")]
    InvalidRange,
    #[error("Failed to fetch spreadsheet metadata")]
    FailedToFetchSpreadsheet,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
    #[error("Failed to create worksheet '{0}'")]
    FailedToCreateWorksheet(String),
    #[error("Failed to delete worksheet '{0}'")]
    FailedToDeleteWorksheet(String),
    #[error("Failed to clear worksheet '{0}'")]
    FailedToClearSheet(String),
    #[error("Batch update rejected by the sheets service")]
    FailedToApplyBatchUpdate,
}

/// Worksheet enumeration result, index order preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetInfo {
    pub count: usize,
    pub names: Vec<String>,
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: SpreadsheetConfig,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client();
        let auth = auth::auth(&config, client.clone())
            .await
            .change_context(SpreadsheetManagerError::AuthenticationFailed)?;
        let hub: SheetsHub = Sheets::new(client, auth);

        Ok(SpreadsheetManager { config, hub })
    }

    #[instrument]
    async fn fetch_spreadsheet(&self) -> error_stack::Result<Spreadsheet, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .get(&self.config.spreadsheet_id)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchSpreadsheet)?;

        Ok(response.1)
    }

    /// Enumerates the worksheets of the document, preserving index order.
    #[instrument]
    pub async fn worksheet_info(
        &self,
    ) -> error_stack::Result<WorksheetInfo, SpreadsheetManagerError> {
        let spreadsheet = self.fetch_spreadsheet().await?;

        let names: Vec<String> = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties.and_then(|props| props.title))
            .collect();

        Ok(WorksheetInfo {
            count: names.len(),
            names,
        })
    }

    /// Looks a worksheet up by title. Matching follows the backing store:
    /// titles are compared exactly as the service reports them.
    #[instrument]
    pub async fn sheet_properties(
        &self,
        title: &str,
    ) -> error_stack::Result<Option<SheetProperties>, SpreadsheetManagerError> {
        let spreadsheet = self.fetch_spreadsheet().await?;

        Ok(spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties)
            .find(|props| props.title.as_deref() == Some(title)))
    }

    /// Like [`Self::sheet_properties`], but an absent sheet is an error.
    pub(super) async fn expect_sheet(
        &self,
        title: &str,
    ) -> error_stack::Result<SheetProperties, SpreadsheetManagerError> {
        self.sheet_properties(title).await?.ok_or_else(|| {
            report!(SpreadsheetManagerError::WorksheetNotFound(title.to_owned()))
        })
    }

    /// Returns the existing worksheet titled `title`, or creates one with at
    /// least `min_rows` x `min_cols` cells. Never overwrites an existing
    /// sheet.
    #[instrument]
    pub async fn ensure_sheet(
        &self,
        title: &str,
        min_rows: u32,
        min_cols: u32,
    ) -> error_stack::Result<SheetProperties, SpreadsheetManagerError> {
        if let Some(existing) = self.sheet_properties(title).await? {
            return Ok(existing);
        }

        let request = Request {
            add_sheet: Some(AddSheetRequest {
                properties: Some(SheetProperties {
                    title: Some(title.to_owned()),
                    grid_properties: Some(GridProperties {
                        row_count: Some(min_rows as i32),
                        column_count: Some(min_cols as i32),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        };

        let response = self
            .batch_update(vec![request])
            .await
            .change_context(SpreadsheetManagerError::FailedToCreateWorksheet(
                title.to_owned(),
            ))?;

        response
            .replies
            .unwrap_or_default()
            .into_iter()
            .filter_map(|reply| reply.add_sheet)
            .filter_map(|add_sheet| add_sheet.properties)
            .next()
            .ok_or_else(|| {
                report!(SpreadsheetManagerError::FailedToCreateWorksheet(
                    title.to_owned()
                ))
                .attach_printable("AddSheet reply carried no sheet properties")
            })
    }

    /// Removes the worksheet titled `title`. Fails if it does not exist.
    #[instrument]
    pub async fn delete_sheet(
        &self,
        title: &str,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        let properties = self.expect_sheet(title).await?;

        let request = Request {
            delete_sheet: Some(DeleteSheetRequest {
                sheet_id: properties.sheet_id,
            }),
            ..Default::default()
        };

        self.batch_update(vec![request])
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToDeleteWorksheet(
                title.to_owned(),
            ))
    }

    /// Blanks every cell in the inclusive rectangle between `start_cell` and
    /// `end_cell` (references like `A1`, `B10`) by writing empty strings.
    /// Cell formatting is untouched.
    #[instrument]
    pub async fn clear_range(
        &self,
        title: &str,
        start_cell: &str,
        end_cell: &str,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.expect_sheet(title).await?;

        let start = CellPosition::from_a1_notation(&A1Notation(start_cell.to_owned()))
            .change_context(SpreadsheetManagerError::InvalidRange)
            .attach_printable_lazy(|| format!("start cell: {}", start_cell))?;
        let end = CellPosition::from_a1_notation(&A1Notation(end_cell.to_owned()))
            .change_context(SpreadsheetManagerError::InvalidRange)
            .attach_printable_lazy(|| format!("end cell: {}", end_cell))?;

        if end.row < start.row || end.col < start.col {
            return Err(report!(SpreadsheetManagerError::InvalidRange)
                .attach_printable(format!("{} is not below-right of {}", end_cell, start_cell)));
        }

        let range = CellRange::new(start, end).with_sheet_title(title);
        let blanks = vec![String::new(); range.cell_count() as usize];
        let value_range = ValueRange::from_flat_cells(&blanks, range.column_count() as usize);

        self.write_range(
            &range.to_a1_notation(range.sheet_title.as_deref()),
            value_range,
        )
        .await
    }

    /// Blanks the entire worksheet content, leaving the sheet in place.
    #[instrument]
    pub async fn clear_sheet(
        &self,
        title: &str,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.expect_sheet(title).await?;

        self.hub
            .spreadsheets()
            .values_clear(
                ClearValuesRequest::default(),
                &self.config.spreadsheet_id,
                &format!("'{}'", title),
            )
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToClearSheet(title.to_owned()))
    }

    pub(super) async fn write_range(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.hub
            .spreadsheets()
            .values_update(value_range, &self.config.spreadsheet_id, range.as_ref())
            .value_input_option("USER_ENTERED")
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to write to range {}", range))
    }

    /// Inserts `row_count` blank rows before 1-based row `at_row`, shifting
    /// existing rows down.
    pub(super) async fn insert_dimension(
        &self,
        sheet_id: i32,
        at_row: Row,
        row_count: u32,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        let start_index = (at_row.0 - 1) as i32;
        let request = Request {
            insert_dimension: Some(InsertDimensionRequest {
                range: Some(DimensionRange {
                    sheet_id: Some(sheet_id),
                    dimension: Some("ROWS".to_owned()),
                    start_index: Some(start_index),
                    end_index: Some(start_index + row_count as i32),
                }),
                inherit_from_before: Some(false),
            }),
            ..Default::default()
        };

        self.batch_update(vec![request])
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| {
                format!("Failed to insert {} row(s) at row {}", row_count, at_row)
            })
    }

    async fn batch_update(
        &self,
        requests: Vec<Request>,
    ) -> error_stack::Result<
        google_sheets4::api::BatchUpdateSpreadsheetResponse,
        SpreadsheetManagerError,
    > {
        let response = self
            .hub
            .spreadsheets()
            .batch_update(
                BatchUpdateSpreadsheetRequest {
                    requests: Some(requests),
                    ..Default::default()
                },
                &self.config.spreadsheet_id,
            )
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToApplyBatchUpdate)?;

        Ok(response.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_fails_when_key_file_is_missing() {
        let config = SpreadsheetConfig::new("/nonexistent/service-account.json", "some-id");
        let result = SpreadsheetManager::new(config).await;

        let report = result.err().expect("missing key file should fail");
        assert!(matches!(
            report.current_context(),
            SpreadsheetManagerError::AuthenticationFailed
        ));
    }
}
