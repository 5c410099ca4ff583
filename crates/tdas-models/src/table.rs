use serde::{Deserialize, Serialize};

/// An in-memory tabular dataset: ordered column names plus rows of raw
/// string cells.
///
/// No schema is enforced. Column lookups return `Option` so callers can
/// skip an aggregation step when the column it needs is absent instead of
/// failing. Cells keep their CSV text verbatim; numeric coercion happens
/// at aggregation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, normalizing every row to the header width: short
    /// rows are padded with empty cells, long rows truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in original order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column by name; first match wins for duplicates.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of a column, top to bottom. `None` if the column is
    /// absent.
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Cell value by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["ShortName".to_string(), "PL_YTD".to_string()],
            vec![
                vec!["Alpha".to_string(), "10.5".to_string()],
                vec!["Beta".to_string(), "-3".to_string()],
            ],
        )
    }

    #[test]
    fn column_lookup() {
        let table = sample();
        assert_eq!(table.len(), 2);
        assert!(table.has_column("PL_YTD"));
        assert!(!table.has_column("Qty"));
        assert_eq!(table.column_index("ShortName"), Some(0));
        assert_eq!(table.value(1, "PL_YTD"), Some("-3"));
        assert_eq!(table.value(1, "Qty"), None);
        assert_eq!(table.value(5, "PL_YTD"), None);
    }

    #[test]
    fn column_values_in_row_order() {
        let table = sample();
        assert_eq!(
            table.column_values("ShortName"),
            Some(vec!["Alpha", "Beta"])
        );
        assert_eq!(table.column_values("missing"), None);
    }

    #[test]
    fn ragged_rows_normalized_to_header_width() {
        let table = Table::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![
                vec!["1".to_string()],
                vec![
                    "1".to_string(),
                    "2".to_string(),
                    "3".to_string(),
                    "4".to_string(),
                ],
            ],
        );
        assert_eq!(table.value(0, "b"), Some(""));
        assert_eq!(table.value(0, "c"), Some(""));
        assert_eq!(table.value(1, "c"), Some("3"));
    }

    #[test]
    fn roundtrip_table() {
        let table = sample();
        let json = serde_json::to_string(&table).unwrap();
        let deserialized: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(table, deserialized);
    }
}
