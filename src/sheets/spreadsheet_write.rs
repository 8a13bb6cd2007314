use std::future::Future;

use error_stack::{report, ResultExt};
use google_sheets4::api::ValueRange;
use tracing::instrument;

use crate::domain::{
    a1_notation::ToA1Notation,
    cell_position::CellPosition,
    cell_range::CellRange,
    column::Column,
    record::{batch_header, flatten_batch, Record},
    row::Row,
};

use super::{
    spreadsheet_manager::{
        SpreadsheetManager, SpreadsheetManagerError, DEFAULT_SHEET_COLS, DEFAULT_SHEET_ROWS,
    },
    value_range_factory::ValueRangeFactory,
};

/// How a record batch lands on existing sheet content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Insert new rows at the start position, shifting existing rows down.
    Insert,
    /// Update exactly the addressed block in place, leaving rows below it
    /// untouched.
    Overwrite,
}

pub trait SpreadsheetWrite {
    /// Inserts a single raw row at 1-based `at_row`, shifting existing rows
    /// down. The worksheet must already exist.
    fn insert_row(
        &self,
        title: &str,
        values: &[String],
        at_row: Row,
    ) -> impl Future<Output = error_stack::Result<(), SpreadsheetManagerError>> + Send;

    /// Writes a uniform record batch starting at `start_row`. The worksheet
    /// is auto-created when absent. Column order is the key order of the
    /// first record; the batch must be non-empty, key-uniform and at most 26
    /// columns wide.
    fn write_records(
        &self,
        title: &str,
        records: &[Record],
        start_row: Row,
        mode: WriteMode,
    ) -> impl Future<Output = error_stack::Result<(), SpreadsheetManagerError>> + Send;
}

impl SpreadsheetWrite for SpreadsheetManager {
    #[instrument(skip(values))]
    async fn insert_row(
        &self,
        title: &str,
        values: &[String],
        at_row: Row,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        if at_row.0 == 0 {
            return Err(report!(SpreadsheetManagerError::InvalidRange)
                .attach_printable("row indices are 1-based, got 0"));
        }

        let properties = self.expect_sheet(title).await?;
        let sheet_id = properties.sheet_id.ok_or_else(|| {
            report!(SpreadsheetManagerError::FailedToWriteRange)
                .attach_printable(format!("Worksheet '{}' has no sheet id", title))
        })?;

        self.insert_dimension(sheet_id, at_row, 1).await?;

        let anchor = CellPosition::new(Column::new(1), at_row);
        self.write_range(
            &anchor.to_a1_notation(Some(title)),
            ValueRange::from_single_row(values),
        )
        .await
    }

    #[instrument(skip(records))]
    async fn write_records(
        &self,
        title: &str,
        records: &[Record],
        start_row: Row,
        mode: WriteMode,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        if start_row.0 == 0 {
            return Err(report!(SpreadsheetManagerError::InvalidRange)
                .attach_printable("row indices are 1-based, got 0"));
        }

        let header = batch_header(records)
            .change_context(SpreadsheetManagerError::InvalidRecordBatch)
            .attach_printable_lazy(|| format!("while writing to worksheet '{}'", title))?;

        let properties = self
            .ensure_sheet(title, DEFAULT_SHEET_ROWS, DEFAULT_SHEET_COLS)
            .await?;

        let cells = flatten_batch(records, &header);
        debug_assert_eq!(cells.len(), records.len() * header.len());
        let value_range = ValueRange::from_flat_cells(&cells, header.len());

        let anchor = CellPosition::new(Column::new(1), start_row);

        match mode {
            WriteMode::Insert => {
                let sheet_id = properties.sheet_id.ok_or_else(|| {
                    report!(SpreadsheetManagerError::FailedToWriteRange)
                        .attach_printable(format!("Worksheet '{}' has no sheet id", title))
                })?;

                self.insert_dimension(sheet_id, start_row, records.len() as u32)
                    .await?;
                self.write_range(&anchor.to_a1_notation(Some(title)), value_range)
                    .await
            }
            WriteMode::Overwrite => {
                let block = CellRange::block(anchor, records.len() as u32, header.len() as u32);
                self.write_range(&block.to_a1_notation(Some(title)), value_range)
                    .await
            }
        }
    }
}
