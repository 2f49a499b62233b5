//! Presentation helpers for the tile showcase: number abbreviation, trend
//! classification and the values behind each tile kind.

use std::time::Duration;

use crate::metrics::{ColumnStatistics, Metrics};

/// Interval between automatic slide tile rotations
pub const SLIDE_ROTATION: Duration = Duration::from_millis(3000);
pub const SLIDE_COUNT: usize = 3;

const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;
const TREND_HIGH: f64 = 0.7;
const TREND_LOW: f64 = 0.3;

/// Abbreviate with one decimal: `1.5K`, `2.0M`; smaller values are rounded.
pub fn format_number(value: f64) -> String {
    if value >= MILLION {
        format!("{:.1}M", value / MILLION)
    } else if value >= THOUSAND {
        format!("{:.1}K", value / THOUSAND)
    } else {
        format!("{:.0}", value.round())
    }
}

/// `1234567` → `1,234,567`
pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    /// Classify by average / maximum: above 0.7 is up, below 0.3 is down.
    pub fn classify(stats: &ColumnStatistics) -> Trend {
        let ratio = stats.average / stats.max;
        if ratio > TREND_HIGH {
            Trend::Up
        } else if ratio < TREND_LOW {
            Trend::Down
        } else {
            Trend::Neutral
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Trend::Up => "📈",
            Trend::Down => "📉",
            Trend::Neutral => "📊",
        }
    }
}

/// KPI tile for one numeric column: its total and average.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTile {
    pub column: String,
    pub total: String,
    pub average: String,
    pub trend: Trend,
}

/// Tiles for the first `max_tiles` numeric columns.
pub fn metric_tiles(metrics: &Metrics, max_tiles: usize) -> Vec<MetricTile> {
    metrics
        .numeric_columns
        .iter()
        .take(max_tiles)
        .map(|(column, stats)| MetricTile {
            column: column.clone(),
            total: format_number(stats.sum),
            average: format_number(stats.average),
            trend: Trend::classify(stats),
        })
        .collect()
}

/// Average of the first numeric column compared against its minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTile {
    pub column: String,
    pub current: f64,
    pub previous: f64,
    /// `None` when the minimum is zero
    pub delta_percent: Option<f64>,
}

impl ComparisonTile {
    pub fn is_increase(&self) -> bool {
        self.delta_percent.is_none_or(|d| d >= 0.0)
    }

    /// e.g. `▲ 12.5% increase`
    pub fn delta_label(&self) -> String {
        match self.delta_percent {
            Some(delta) if delta >= 0.0 => format!("▲ {:.1}% increase", delta),
            Some(delta) => format!("▼ {:.1}% decrease", delta.abs()),
            None => "▲ n/a".to_string(),
        }
    }
}

pub fn comparison_tile(metrics: &Metrics) -> Option<ComparisonTile> {
    let (column, stats) = metrics.first_numeric()?;
    let delta_percent =
        (stats.min != 0.0).then(|| (stats.average - stats.min) / stats.min * 100.0);
    Some(ComparisonTile {
        column: column.to_string(),
        current: stats.average,
        previous: stats.min,
        delta_percent,
    })
}

/// Five-bar sparkline of the first numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct MicroChart {
    pub column: String,
    /// min, 0.8 × avg, avg, 1.2 × avg, max
    pub values: [f64; 5],
    /// Each value as a percentage of the largest one
    pub heights: [u64; 5],
}

pub fn micro_chart(metrics: &Metrics) -> Option<MicroChart> {
    let (column, stats) = metrics.first_numeric()?;
    let values = [
        stats.min,
        stats.average * 0.8,
        stats.average,
        stats.average * 1.2,
        stats.max,
    ];
    let peak = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let heights = values.map(|v| {
        if peak > 0.0 {
            (v / peak * 100.0).round().clamp(0.0, 100.0) as u64
        } else {
            0
        }
    });
    Some(MicroChart {
        column: column.to_string(),
        values,
        heights,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub header: &'static str,
    pub value: String,
    pub footer: String,
}

/// Record count, column count, and the first numeric column's total.
pub fn slides(metrics: &Metrics) -> [Slide; SLIDE_COUNT] {
    let (total, footer) = match metrics.first_numeric() {
        Some((column, stats)) => (format_number(stats.sum), format!("{column} Total")),
        None => ("0".to_string(), "No Data".to_string()),
    };
    [
        Slide {
            header: "TODAY",
            value: group_thousands(metrics.row_count),
            footer: "Total Records".to_string(),
        },
        Slide {
            header: "THIS WEEK",
            value: metrics.column_count.to_string(),
            footer: "Data Columns".to_string(),
        },
        Slide {
            header: "THIS MONTH",
            value: total,
            footer,
        },
    ]
}

/// One-line statistics summary shown when a metric tile is selected.
pub fn metric_details(column: &str, metrics: &Metrics) -> Option<String> {
    let stats = metrics.numeric_columns.get(column)?;
    Some(format!(
        "{column}: Total {:.2}, Avg {:.2}, Min {:.2}, Max {:.2}, Count {}",
        stats.sum, stats.average, stats.min, stats.max, stats.count
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::row_from_pairs;
    use crate::metrics::calculate_metrics;

    fn stats(average: f64, max: f64) -> ColumnStatistics {
        ColumnStatistics {
            sum: average * 2.0,
            average,
            min: 0.0,
            max,
            count: 2,
        }
    }

    fn sales() -> Metrics {
        calculate_metrics(&[
            row_from_pairs([("Region", "North"), ("Sales", "1000")]),
            row_from_pairs([("Region", "South"), ("Sales", "2000")]),
            row_from_pairs([("Region", "East"), ("Sales", "3000")]),
        ])
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1500.0), "1.5K");
        assert_eq!(format_number(2_000_000.0), "2.0M");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(12.4), "12");
        assert_eq!(format_number(1000.0), "1.0K");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_trend_thresholds() {
        assert_eq!(Trend::classify(&stats(8.0, 10.0)), Trend::Up);
        assert_eq!(Trend::classify(&stats(7.0, 10.0)), Trend::Neutral);
        assert_eq!(Trend::classify(&stats(3.0, 10.0)), Trend::Neutral);
        assert_eq!(Trend::classify(&stats(2.0, 10.0)), Trend::Down);
        assert_eq!(Trend::Up.glyph(), "📈");
    }

    #[test]
    fn test_metric_tiles() {
        let tiles = metric_tiles(&sales(), 2);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].column, "Sales");
        assert_eq!(tiles[0].total, "6.0K");
        assert_eq!(tiles[0].average, "2.0K");
        // 2000 / 3000 sits between the thresholds
        assert_eq!(tiles[0].trend, Trend::Neutral);
    }

    #[test]
    fn test_comparison_tile() {
        let tile = comparison_tile(&sales()).unwrap();
        assert_eq!(tile.current, 2000.0);
        assert_eq!(tile.previous, 1000.0);
        assert_eq!(tile.delta_label(), "▲ 100.0% increase");
        assert!(comparison_tile(&Metrics::default()).is_none());
    }

    #[test]
    fn test_micro_chart_heights() {
        let chart = micro_chart(&sales()).unwrap();
        assert_eq!(chart.values, [1000.0, 1600.0, 2000.0, 2400.0, 3000.0]);
        assert_eq!(chart.heights, [33, 53, 67, 80, 100]);
    }

    #[test]
    fn test_slides() {
        let [records, columns, total] = slides(&sales());
        assert_eq!(records.value, "3");
        assert_eq!(columns.value, "2");
        assert_eq!(total.value, "6.0K");
        assert_eq!(total.footer, "Sales Total");

        let empty = slides(&Metrics::default());
        assert_eq!(empty[2].footer, "No Data");
    }

    #[test]
    fn test_metric_details() {
        let details = metric_details("Sales", &sales()).unwrap();
        assert_eq!(
            details,
            "Sales: Total 6000.00, Avg 2000.00, Min 1000.00, Max 3000.00, Count 3"
        );
        assert!(metric_details("Region", &sales()).is_none());
    }
}
