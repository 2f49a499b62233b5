//! Dataset metrics: column inventory and per-column numeric statistics.

use indexmap::IndexMap;
use serde::Serialize;

use crate::dataset::Row;

/// Summary of the numeric cells of one column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStatistics {
    pub sum: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Number of cells that parsed to a finite number
    pub count: usize,
}

/// Counts and statistics derived from a full set of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    /// Only columns with at least one numeric cell, in column order
    pub numeric_columns: IndexMap<String, ColumnStatistics>,
}

impl Metrics {
    pub fn is_numeric(&self, column: &str) -> bool {
        self.numeric_columns.contains_key(column)
    }

    /// First numeric column in column order.
    pub fn first_numeric(&self) -> Option<(&str, &ColumnStatistics)> {
        self.numeric_columns
            .iter()
            .next()
            .map(|(name, stats)| (name.as_str(), stats))
    }

    /// Total number of cells (rows × columns).
    pub fn cell_count(&self) -> usize {
        self.row_count * self.column_count
    }
}

/// Compute metrics for `rows`. Columns come from the first row's keys.
pub fn calculate_metrics(rows: &[Row]) -> Metrics {
    let Some(first) = rows.first() else {
        return Metrics::default();
    };

    let columns: Vec<String> = first.keys().cloned().collect();
    let mut numeric_columns = IndexMap::new();

    for column in &columns {
        let mut values = rows
            .iter()
            .filter_map(|row| row.get(column))
            .filter_map(|cell| parse_finite(cell));

        let Some(first_value) = values.next() else {
            continue;
        };

        let mut stats = ColumnStatistics {
            sum: first_value,
            average: 0.0,
            min: first_value,
            max: first_value,
            count: 1,
        };
        for v in values {
            stats.sum += v;
            stats.min = stats.min.min(v);
            stats.max = stats.max.max(v);
            stats.count += 1;
        }
        stats.average = stats.sum / stats.count as f64;

        numeric_columns.insert(column.clone(), stats);
    }

    Metrics {
        row_count: rows.len(),
        column_count: columns.len(),
        columns,
        numeric_columns,
    }
}

/// Parse the leading decimal number of a cell.
///
/// Leading whitespace is skipped and the longest prefix forming a decimal
/// literal is used, so `"12px"` is 12 and `"abc"` is `None`. `Infinity`
/// (optionally signed) parses to an infinite value.
pub fn parse_number(cell: &str) -> Option<f64> {
    let s = cell.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Like [`parse_number`], but only finite values.
pub fn parse_finite(cell: &str) -> Option<f64> {
    parse_number(cell).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::row_from_pairs;

    #[test]
    fn test_numeric_column_inclusion() {
        let rows = vec![
            row_from_pairs([("A", "10"), ("B", "x")]),
            row_from_pairs([("A", "20"), ("B", "y")]),
        ];
        let m = calculate_metrics(&rows);
        assert_eq!(m.columns, ["A", "B"]);
        assert_eq!(m.numeric_columns.len(), 1);
        let a = m.numeric_columns["A"];
        assert_eq!(a.sum, 30.0);
        assert_eq!(a.average, 15.0);
        assert_eq!(a.min, 10.0);
        assert_eq!(a.max, 20.0);
        assert_eq!(a.count, 2);
        assert!(!m.is_numeric("B"));
    }

    #[test]
    fn test_non_numeric_cells_excluded() {
        let rows = vec![
            row_from_pairs([("Qty", "5")]),
            row_from_pairs([("Qty", "15")]),
            row_from_pairs([("Qty", "abc")]),
        ];
        let m = calculate_metrics(&rows);
        assert_eq!(m.row_count, 3);
        assert_eq!(m.column_count, 1);
        let qty = m.numeric_columns["Qty"];
        assert_eq!(qty.sum, 20.0);
        assert_eq!(qty.average, 10.0);
        assert_eq!(qty.min, 5.0);
        assert_eq!(qty.max, 15.0);
        assert_eq!(qty.count, 2);
    }

    #[test]
    fn test_empty_cells_are_not_zero() {
        let rows = vec![
            row_from_pairs([("N", "")]),
            row_from_pairs([("N", "4")]),
            row_from_pairs([("N", "  ")]),
        ];
        let m = calculate_metrics(&rows);
        let n = m.numeric_columns["N"];
        assert_eq!(n.count, 1);
        assert_eq!(n.min, 4.0);
        assert_eq!(n.average, 4.0);
    }

    #[test]
    fn test_empty_input() {
        let m = calculate_metrics(&[]);
        assert_eq!(m, Metrics::default());
        assert_eq!(m.row_count, 0);
        assert_eq!(m.column_count, 0);
        assert!(m.columns.is_empty());
        assert!(m.numeric_columns.is_empty());
    }

    #[test]
    fn test_metrics_are_pure() {
        let rows = vec![
            row_from_pairs([("A", "1.5"), ("B", "-2")]),
            row_from_pairs([("A", "x"), ("B", "3e1")]),
        ];
        let before = rows.clone();
        let first = calculate_metrics(&rows);
        let second = calculate_metrics(&rows);
        assert_eq!(first, second);
        assert_eq!(rows, before);
        assert_eq!(first.numeric_columns["B"].max, 30.0);
    }

    #[test]
    fn test_infinite_values_excluded() {
        let rows = vec![
            row_from_pairs([("A", "Infinity")]),
            row_from_pairs([("A", "1e999")]),
        ];
        let m = calculate_metrics(&rows);
        assert!(m.numeric_columns.is_empty());
    }

    #[test]
    fn test_parse_number_prefix() {
        assert_eq!(parse_number("12px"), Some(12.0));
        assert_eq!(parse_number("  3.25 "), Some(3.25));
        assert_eq!(parse_number("-0.5"), Some(-0.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("2e"), Some(2.0));
        assert_eq!(parse_number("1,234"), Some(1.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_first_numeric_and_cells() {
        let rows = vec![row_from_pairs([("Name", "a"), ("Sales", "7"), ("Cost", "2")])];
        let m = calculate_metrics(&rows);
        assert_eq!(m.first_numeric().map(|(n, _)| n), Some("Sales"));
        assert_eq!(m.cell_count(), 3);
    }
}
