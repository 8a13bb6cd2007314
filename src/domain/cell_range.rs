use error_stack::report;

use super::{
    a1_notation::{
        generic_a1_notation_split, A1Notation, A1NotationParseError, FromA1Notation, ToA1Notation,
    },
    cell_position::CellPosition,
    column::Column,
    row::Row,
};

/// An inclusive rectangular region of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
    pub sheet_title: Option<String>,
}

impl CellRange {
    pub fn new(start: CellPosition, end: CellPosition) -> Self {
        CellRange {
            start,
            end,
            sheet_title: None,
        }
    }

    /// Range covering `row_count` x `column_count` cells, anchored at `start`.
    pub fn block(start: CellPosition, row_count: u32, column_count: u32) -> Self {
        assert!(row_count > 0 && column_count > 0, "block cannot be empty");
        CellRange {
            start,
            end: CellPosition {
                col: start.col + Column::new(column_count) - Column::new(1),
                row: start.row + Row(row_count) - Row(1),
            },
            sheet_title: None,
        }
    }

    pub fn row_count(&self) -> u32 {
        self.end.row.0 - self.start.row.0 + 1
    }

    pub fn column_count(&self) -> u32 {
        self.end.col.value() - self.start.col.value() + 1
    }

    pub fn cell_count(&self) -> u32 {
        self.row_count() * self.column_count()
    }

    pub fn with_sheet_title(self, sheet_title: impl Into<String>) -> Self {
        Self {
            sheet_title: Some(sheet_title.into()),
            ..self
        }
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let start = self.start.to_a1_notation(None);
        let end = self.end.to_a1_notation(None);

        match sheet_name {
            Some(sheet_name) => A1Notation(format!("'{}'!{}:{}", sheet_name, start, end)),
            None => A1Notation(format!("{}:{}", start, end)),
        }
    }
}

impl FromA1Notation for CellRange {
    type Err = A1NotationParseError;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err> {
        let parts = generic_a1_notation_split(a1_notation);

        let start = CellPosition::from_a1_notation(&A1Notation(parts.start))?;
        let end = CellPosition::from_a1_notation(&A1Notation(parts.end))?;

        if end.row < start.row || end.col < start.col {
            return Err(report!(A1NotationParseError::InvertedRange));
        }

        Ok(CellRange {
            start,
            end,
            sheet_title: parts.sheet_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(col: u32, row: u32) -> CellPosition {
        CellPosition::new(Column::new(col), Row(row))
    }

    #[test]
    fn test_block_range_for_two_records_two_columns() {
        // 2 records of 2 fields starting at row 2 address A2:B3
        let range = CellRange::block(cell(1, 2), 2, 2);
        assert_eq!(range.to_a1_notation(None).as_ref(), "A2:B3");
        assert_eq!(range.row_count(), 2);
        assert_eq!(range.column_count(), 2);
        assert_eq!(range.cell_count(), 4);
    }

    #[test]
    fn test_block_range_single_cell() {
        let range = CellRange::block(cell(3, 7), 1, 1);
        assert_eq!(range.to_a1_notation(None).as_ref(), "C7:C7");
    }

    #[test]
    fn test_to_a1_notation_with_sheet_title() {
        let range = CellRange::new(cell(1, 1), cell(7, 10));
        assert_eq!(
            range.to_a1_notation(Some("Fake Users")).as_ref(),
            "'Fake Users'!A1:G10"
        );
    }

    #[test]
    fn test_from_a1_notation_range() {
        let range = CellRange::from_a1_notation(&"A1:B2".to_string().into()).unwrap();
        assert_eq!(range.start, cell(1, 1));
        assert_eq!(range.end, cell(2, 2));
        assert_eq!(range.sheet_title, None);
    }

    #[test]
    fn test_from_a1_notation_with_sheet() {
        let range = CellRange::from_a1_notation(&"'Users'!B2:C10".to_string().into()).unwrap();
        assert_eq!(range.sheet_title.as_deref(), Some("Users"));
        assert_eq!(range.row_count(), 9);
        assert_eq!(range.column_count(), 2);
    }

    #[test]
    fn test_from_a1_notation_rejects_inverted_range() {
        assert!(CellRange::from_a1_notation(&"B2:A1".to_string().into()).is_err());
    }
}
