use google_sheets4::api::ValueRange;
use serde_json::Value;

/// Builds `ValueRange` payloads for the update endpoints.
pub trait ValueRangeFactory {
    /// One inner vector per sheet row.
    fn from_rows<T: AsRef<str>>(rows: &[Vec<T>]) -> Self;

    /// A single sheet row.
    fn from_single_row<T: AsRef<str>>(values: &[T]) -> Self;

    /// Row-major flat cell buffer, chunked into rows of `column_count`
    /// cells. The buffer length must be a multiple of `column_count`.
    fn from_flat_cells<T: AsRef<str>>(cells: &[T], column_count: usize) -> Self;
}

fn to_value_rows<T: AsRef<str>>(rows: &[Vec<T>]) -> Vec<Vec<Value>> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| Value::String(cell.as_ref().to_owned()))
                .collect()
        })
        .collect()
}

impl ValueRangeFactory for ValueRange {
    fn from_rows<T: AsRef<str>>(rows: &[Vec<T>]) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(to_value_rows(rows)),
        }
    }

    fn from_single_row<T: AsRef<str>>(values: &[T]) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(vec![values
                .iter()
                .map(|cell| Value::String(cell.as_ref().to_owned()))
                .collect()]),
        }
    }

    fn from_flat_cells<T: AsRef<str>>(cells: &[T], column_count: usize) -> Self {
        assert!(column_count > 0, "column_count must be positive");
        assert!(
            cells.len() % column_count == 0,
            "flat buffer length {} is not a multiple of column count {}",
            cells.len(),
            column_count
        );

        let values = cells
            .chunks(column_count)
            .map(|row| {
                row.iter()
                    .map(|cell| Value::String(cell.as_ref().to_owned()))
                    .collect()
            })
            .collect();

        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_shape() {
        let value_range =
            ValueRange::from_rows(&[vec!["1", "2"], vec!["3", "4"]]);
        assert_eq!(value_range.major_dimension.as_deref(), Some("ROWS"));
        let values = value_range.values.unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], vec![Value::String("1".into()), Value::String("2".into())]);
    }

    #[test]
    fn test_from_single_row() {
        let value_range = ValueRange::from_single_row(&["a", "b", "c"]);
        let values = value_range.values.unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].len(), 3);
    }

    #[test]
    fn test_from_flat_cells_chunks_row_major() {
        let value_range = ValueRange::from_flat_cells(&["1", "2", "3", "4", "5", "6"], 3);
        let values = value_range.values.unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1][0], Value::String("4".into()));
    }

    #[test]
    #[should_panic(expected = "not a multiple")]
    fn test_from_flat_cells_rejects_ragged_buffer() {
        let _ = ValueRange::from_flat_cells(&["1", "2", "3"], 2);
    }
}
