//! Rows and datasets as decoded from a spreadsheet.
//!
//! Cell values are kept as strings. Numeric interpretation happens lazily in
//! [`crate::metrics`] and when sorting, never at load time.

use indexmap::IndexMap;

/// One record: column name to cell value, in source header order.
pub type Row = IndexMap<String, String>;

/// Build a row from `(column, value)` pairs.
pub fn row_from_pairs<I, K, V>(pairs: I) -> Row
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Where a dataset came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInfo {
    pub file_name: String,
    pub sheet_names: Vec<String>,
    pub sheet_index: usize,
}

impl SourceInfo {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            sheet_names: Vec::new(),
            sheet_index: 0,
        }
    }

    pub fn with_sheets(mut self, sheet_names: Vec<String>, sheet_index: usize) -> Self {
        self.sheet_names = sheet_names;
        self.sheet_index = sheet_index;
        self
    }

    /// Name of the active sheet, if the source has named sheets.
    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_names.get(self.sheet_index).map(String::as_str)
    }
}

/// An ordered collection of rows sharing one column set.
///
/// Every row holds exactly the dataset's columns, in the same order; cells
/// missing from the input are filled with `""`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
    source: SourceInfo,
}

impl Dataset {
    /// Create a dataset whose columns are taken from the first row.
    pub fn new(rows: Vec<Row>, source: SourceInfo) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        Self::with_columns(columns, rows, source)
    }

    /// Create a dataset with an explicit column list. Rows are normalised to
    /// that column list: extra keys are dropped and missing keys become `""`.
    pub fn with_columns(columns: Vec<String>, rows: Vec<Row>, source: SourceInfo) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                let conforms = row.len() == columns.len()
                    && row.keys().zip(columns.iter()).all(|(k, c)| k == c);
                if conforms {
                    return row;
                }
                columns
                    .iter()
                    .map(|c| (c.clone(), row.swap_remove(c).unwrap_or_default()))
                    .collect()
            })
            .collect();
        Self {
            columns,
            rows,
            source,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn source(&self) -> &SourceInfo {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_from_first_row() {
        let rows = vec![
            row_from_pairs([("Name", "Ann"), ("City", "NY")]),
            row_from_pairs([("Name", "Bob"), ("City", "LA")]),
        ];
        let ds = Dataset::new(rows, SourceInfo::new("people.xlsx"));
        assert_eq!(ds.columns(), ["Name", "City"]);
        assert_eq!(ds.len(), 2);
        assert!(ds.has_column("City"));
        assert!(!ds.has_column("Zip"));
    }

    #[test]
    fn test_missing_cells_are_filled() {
        let rows = vec![
            row_from_pairs([("A", "1"), ("B", "2")]),
            row_from_pairs([("B", "3")]),
        ];
        let ds = Dataset::new(rows, SourceInfo::default());
        let second = ds.row(1).unwrap();
        assert_eq!(second.keys().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(second["A"], "");
        assert_eq!(second["B"], "3");
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::new(Vec::new(), SourceInfo::default());
        assert!(ds.is_empty());
        assert!(ds.columns().is_empty());
        assert!(ds.row(0).is_none());
    }

    #[test]
    fn test_source_sheet_name() {
        let source = SourceInfo::new("book.xlsx")
            .with_sheets(vec!["Q1".to_string(), "Q2".to_string()], 1);
        assert_eq!(source.sheet_name(), Some("Q2"));
        assert_eq!(SourceInfo::new("x.xlsx").sheet_name(), None);
    }
}
