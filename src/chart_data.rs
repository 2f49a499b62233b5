//! Prepare chart series from query results: pick the label and value columns,
//! limit the number of records, and convert cells to numbers.

use crate::dataset::Row;
use crate::metrics::{parse_number, Metrics};

/// Chart renderings offered by the chart view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::Scatter];

    pub fn next(self) -> Self {
        match self {
            ChartKind::Bar => ChartKind::Line,
            ChartKind::Line => ChartKind::Scatter,
            ChartKind::Scatter => ChartKind::Bar,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
            ChartKind::Scatter => "Scatter Chart",
        }
    }
}

/// Columns a chart plots when none are chosen explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartColumns {
    pub label: String,
    pub value: String,
}

/// First column as labels; first numeric column (else the second column) as values.
pub fn best_chart_columns(metrics: &Metrics) -> Option<ChartColumns> {
    let label = metrics.columns.first()?.clone();
    let value = metrics
        .first_numeric()
        .map(|(name, _)| name.to_string())
        .or_else(|| metrics.columns.get(1).cloned())?;
    Some(ChartColumns { label, value })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Labels plus one or more value series of equal length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(x, y)` points for one series, with x the record position.
    pub fn points(&self, series: usize) -> Vec<(f64, f64)> {
        self.series
            .get(series)
            .map(|s| {
                s.values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (i as f64, *v))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Smallest and largest value over all series, always including 0.
    pub fn value_bounds(&self) -> (f64, f64) {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold((0.0, 0.0), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }
}

/// Single-series data from the first `max_rows` rows. Unparseable values plot as 0.
pub fn prepare_chart_data(
    rows: &[Row],
    label_column: &str,
    value_column: &str,
    max_rows: usize,
) -> ChartData {
    prepare_multi_series(rows, label_column, &[value_column.to_string()], max_rows)
}

pub fn prepare_multi_series(
    rows: &[Row],
    label_column: &str,
    value_columns: &[String],
    max_rows: usize,
) -> ChartData {
    let limited = &rows[..rows.len().min(max_rows)];
    let labels = limited
        .iter()
        .map(|row| row.get(label_column).cloned().unwrap_or_default())
        .collect();
    let series = value_columns
        .iter()
        .map(|column| ChartSeries {
            name: column.clone(),
            values: limited
                .iter()
                .map(|row| {
                    row.get(column)
                        .and_then(|cell| parse_number(cell))
                        .filter(|v| v.is_finite())
                        .unwrap_or(0.0)
                })
                .collect(),
        })
        .collect();
    ChartData { labels, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::row_from_pairs;
    use crate::metrics::calculate_metrics;

    fn rows() -> Vec<Row> {
        (1..=15)
            .map(|i| {
                let qty = if i == 3 { "n/a".to_string() } else { (i * 10).to_string() };
                row_from_pairs([("Item".to_string(), format!("item-{i}")), ("Qty".to_string(), qty)])
            })
            .collect()
    }

    #[test]
    fn test_best_chart_columns() {
        let columns = best_chart_columns(&calculate_metrics(&rows())).unwrap();
        assert_eq!(columns.label, "Item");
        assert_eq!(columns.value, "Qty");

        let text_only = calculate_metrics(&[row_from_pairs([("A", "x"), ("B", "y")])]);
        assert_eq!(best_chart_columns(&text_only).unwrap().value, "B");
        assert!(best_chart_columns(&Metrics::default()).is_none());
    }

    #[test]
    fn test_prepare_limits_rows_and_zeroes_text() {
        let data = prepare_chart_data(&rows(), "Item", "Qty", 10);
        assert_eq!(data.labels.len(), 10);
        assert_eq!(data.labels[0], "item-1");
        assert_eq!(data.series[0].values[..4], [10.0, 20.0, 0.0, 40.0]);
        assert_eq!(data.points(0)[1], (1.0, 20.0));
        assert_eq!(data.value_bounds(), (0.0, 100.0));
    }

    #[test]
    fn test_multi_series() {
        let data = prepare_multi_series(
            &rows(),
            "Item",
            &["Qty".to_string(), "Missing".to_string()],
            3,
        );
        assert_eq!(data.series.len(), 2);
        assert_eq!(data.series[1].values, [0.0, 0.0, 0.0]);
        assert!(data.points(5).is_empty());
    }

    #[test]
    fn test_chart_kind_cycle() {
        let mut kind = ChartKind::default();
        for expected in [ChartKind::Line, ChartKind::Scatter, ChartKind::Bar] {
            kind = kind.next();
            assert_eq!(kind, expected);
        }
    }
}
