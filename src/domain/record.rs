use thiserror::Error;

/// Writes address columns with a single letter only, so a record batch may
/// carry at most 26 fields. Wider tables are out of scope.
pub const MAX_BATCH_COLUMNS: usize = 26;

/// An ordered string-to-string mapping. Insertion order defines column
/// order; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Record {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordBatchError {
    #[error("Record batch is empty, no header can be derived")]
    EmptyBatch,
    #[error("Record at index {index} does not match the header of the first record")]
    MismatchedKeys { index: usize },
    #[error("Record batch has {0} fields, at most {MAX_BATCH_COLUMNS} are addressable")]
    TooManyColumns(usize),
}

/// Derives the canonical column order for a batch: the keys of the first
/// record, in their insertion order. Every other record must carry exactly
/// the same keys in the same order.
pub fn batch_header(records: &[Record]) -> Result<Vec<String>, RecordBatchError> {
    let first = records.first().ok_or(RecordBatchError::EmptyBatch)?;
    let header: Vec<String> = first.keys().map(str::to_owned).collect();

    if header.len() > MAX_BATCH_COLUMNS {
        return Err(RecordBatchError::TooManyColumns(header.len()));
    }

    for (index, record) in records.iter().enumerate().skip(1) {
        if !record.keys().eq(header.iter().map(String::as_str)) {
            return Err(RecordBatchError::MismatchedKeys { index });
        }
    }

    Ok(header)
}

/// Flattens a batch into one scalar per cell, row-major: for each record in
/// sequence, one value per header key. The result has exactly
/// `records.len() * header.len()` entries.
pub fn flatten_batch(records: &[Record], header: &[String]) -> Vec<String> {
    let mut cells = Vec::with_capacity(records.len() * header.len());
    for record in records {
        for key in header {
            cells.push(record.get(key).unwrap_or_default().to_owned());
        }
    }
    cells
}

/// Same batch as row vectors, for row-oriented writes.
pub fn batch_rows(records: &[Record], header: &[String]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            header
                .iter()
                .map(|key| record.get(key).unwrap_or_default().to_owned())
                .collect()
        })
        .collect()
}

/// Rebuilds records by zipping each raw row against the header positionally.
/// Short rows leave the trailing keys absent; excess values are dropped;
/// duplicate header names collapse to the last value.
pub fn records_from_rows<R, V>(header: &[String], rows: R) -> Vec<Record>
where
    R: IntoIterator<Item = Vec<V>>,
    V: Into<String>,
{
    rows.into_iter()
        .map(|row| {
            header
                .iter()
                .cloned()
                .zip(row.into_iter().map(Into::into))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_record_preserves_insertion_order() {
        let record = record(&[("b", "2"), ("a", "1"), ("c", "3")]);
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_record_insert_replaces_in_place() {
        let mut record = record(&[("a", "1"), ("b", "2")]);
        record.insert("a", "9");
        assert_eq!(record.get("a"), Some("9"));
        assert_eq!(record.len(), 2);
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_batch_header_uses_first_record() {
        let records = vec![record(&[("a", "1"), ("b", "2")]), record(&[("a", "3"), ("b", "4")])];
        assert_eq!(batch_header(&records).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_batch_header_empty_batch() {
        assert_eq!(batch_header(&[]), Err(RecordBatchError::EmptyBatch));
    }

    #[test]
    fn test_batch_header_mismatched_keys() {
        let records = vec![record(&[("a", "1")]), record(&[("b", "2")])];
        assert_eq!(
            batch_header(&records),
            Err(RecordBatchError::MismatchedKeys { index: 1 })
        );
    }

    #[test]
    fn test_batch_header_mismatched_order() {
        let records = vec![
            record(&[("a", "1"), ("b", "2")]),
            record(&[("b", "4"), ("a", "3")]),
        ];
        assert_eq!(
            batch_header(&records),
            Err(RecordBatchError::MismatchedKeys { index: 1 })
        );
    }

    #[test]
    fn test_batch_header_too_many_columns() {
        let wide: Record = (0..27)
            .map(|i| (format!("field{}", i), String::from("x")))
            .collect();
        assert_eq!(
            batch_header(&[wide]),
            Err(RecordBatchError::TooManyColumns(27))
        );
    }

    #[test]
    fn test_flatten_batch_row_major() {
        let records = vec![record(&[("a", "1"), ("b", "2")]), record(&[("a", "3"), ("b", "4")])];
        let header = batch_header(&records).unwrap();
        let cells = flatten_batch(&records, &header);
        assert_eq!(cells, vec!["1", "2", "3", "4"]);
        assert_eq!(cells.len(), records.len() * header.len());
    }

    #[test]
    fn test_batch_rows() {
        let records = vec![record(&[("a", "1"), ("b", "2")]), record(&[("a", "3"), ("b", "4")])];
        let header = batch_header(&records).unwrap();
        assert_eq!(
            batch_rows(&records, &header),
            vec![vec!["1", "2"], vec!["3", "4"]]
        );
    }

    #[test]
    fn test_records_from_rows_roundtrip() {
        let original = vec![
            record(&[("a", "1"), ("b", "2")]),
            record(&[("a", "3"), ("b", "4")]),
        ];
        let header = batch_header(&original).unwrap();
        let rows = batch_rows(&original, &header);
        assert_eq!(records_from_rows(&header, rows), original);
    }

    #[test]
    fn test_records_from_rows_short_row_omits_keys() {
        let header = vec!["a".to_owned(), "b".to_owned()];
        let records = records_from_rows(&header, vec![vec!["1"]]);
        assert_eq!(records[0].get("a"), Some("1"));
        assert_eq!(records[0].get("b"), None);
        assert_eq!(records[0].len(), 1);
    }

    #[test]
    fn test_records_from_rows_long_row_drops_excess() {
        let header = vec!["a".to_owned()];
        let records = records_from_rows(&header, vec![vec!["1", "extra"]]);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("a"), Some("1"));
    }

    #[test]
    fn test_records_from_rows_duplicate_header_last_wins() {
        let header = vec!["a".to_owned(), "a".to_owned()];
        let records = records_from_rows(&header, vec![vec!["1", "2"]]);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("a"), Some("2"));
    }
}
