use error_stack::{report, ResultExt};

use super::{
    a1_notation::{
        generic_a1_notation_split, A1Notation, A1NotationParseError, A1NotationParts,
        FromA1Notation,
    },
    column::{parse_col, Column},
    row::Row,
};

/// A single cell, addressed by 1-based column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub col: Column,
    pub row: Row,
}

impl CellPosition {
    pub fn new(col: Column, row: Row) -> Self {
        CellPosition { col, row }
    }
}

/// CellPosition operations

impl std::ops::Add<CellPosition> for CellPosition {
    type Output = CellPosition;

    fn add(self, rhs: CellPosition) -> Self::Output {
        CellPosition {
            col: self.col + rhs.col,
            row: self.row + rhs.row,
        }
    }
}

impl std::ops::Add<Row> for CellPosition {
    type Output = CellPosition;

    fn add(self, rhs: Row) -> Self::Output {
        CellPosition {
            col: self.col,
            row: self.row + rhs,
        }
    }
}

impl std::ops::Add<Column> for CellPosition {
    type Output = CellPosition;

    fn add(self, rhs: Column) -> Self::Output {
        CellPosition {
            col: self.col + rhs,
            row: self.row,
        }
    }
}

/// Splits a local cell reference like `B10` into its letter prefix and digit
/// suffix.
fn split_cell_ref(cell_ref: &str) -> (&str, &str) {
    let letters_len = cell_ref
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .count();
    cell_ref.split_at(letters_len)
}

/// Conversions: Others -> CellPosition

impl FromA1Notation for CellPosition {
    type Err = A1NotationParseError;

    fn from_a1_notation(a1_notation: &A1Notation) -> error_stack::Result<Self, Self::Err> {
        let parts: A1NotationParts = generic_a1_notation_split(a1_notation);

        if parts.start != parts.end {
            return Err(report!(A1NotationParseError::NotASingleCell));
        }

        let (col_str, row_str) = split_cell_ref(&parts.start);

        Ok(CellPosition {
            col: parse_col(col_str).change_context(A1NotationParseError::ColumnParseError)?,
            row: row_str
                .parse::<Row>()
                .change_context(A1NotationParseError::RowParseError)?,
        })
    }
}
