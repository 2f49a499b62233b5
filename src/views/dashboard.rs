use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use super::{card, field, RenderContext};
use crate::dataset::SourceInfo;
use crate::metrics::Metrics;
use crate::tiles::group_thousands;

pub const NO_NUMERIC_COLUMNS: &str = "No numeric columns detected";

/// Overview of the loaded dataset: source info, numeric column summary and shortcuts.
pub struct DashboardView<'a> {
    pub metrics: &'a Metrics,
    pub source: &'a SourceInfo,
    pub ctx: &'a RenderContext,
}

/// `(label, value)` pairs of the dataset information card.
pub fn dataset_info(metrics: &Metrics, source: &SourceInfo) -> Vec<(&'static str, String)> {
    let mut info = vec![("File", source.file_name.clone())];
    if let Some(sheet) = source.sheet_name() {
        info.push((
            "Sheet",
            format!(
                "{} ({} of {})",
                sheet,
                source.sheet_index + 1,
                source.sheet_names.len()
            ),
        ));
    }
    info.push(("Total Records", group_thousands(metrics.row_count)));
    info.push(("Total Columns", metrics.column_count.to_string()));
    info.push((
        "Data Density",
        format!("{} cells", group_thousands(metrics.cell_count())),
    ));
    info
}

/// Numeric column names, at most `max` of them, then `... and N more`.
pub fn numeric_summary(metrics: &Metrics, max: usize) -> Vec<String> {
    let total = metrics.numeric_columns.len();
    if total == 0 {
        return vec![NO_NUMERIC_COLUMNS.to_string()];
    }
    let mut lines = vec![format!("Count: {total}")];
    lines.extend(
        metrics
            .numeric_columns
            .iter()
            .take(max)
            .map(|(name, stats)| format!("• {name} (avg {:.2})", stats.average)),
    );
    if total > max {
        lines.push(format!("... and {} more", total - max));
    }
    lines
}

const QUICK_ACTIONS: [(&str, &str); 4] = [
    ("4", "Chart visualizations"),
    ("5", "Tile showcase"),
    ("9", "Data table"),
    ("e", "Export current view"),
];

impl Widget for DashboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Fill(1)])
            .split(area);

        Paragraph::new(format!(
            "📊 Analytics Dashboard - Viewing data from: {} ({} rows, {} columns)",
            self.source.file_name, self.metrics.row_count, self.metrics.column_count
        ))
        .style(Style::default().fg(ctx.info))
        .render(rows[0], buf);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[1]);

        let info: Vec<Line> = dataset_info(self.metrics, self.source)
            .into_iter()
            .map(|(label, value)| field(label, value))
            .collect();
        Paragraph::new(info)
            .wrap(Wrap { trim: true })
            .block(card("Dataset Information", ctx.primary))
            .render(cards[0], buf);

        let summary: Vec<Line> = numeric_summary(self.metrics, ctx.max_numeric_columns)
            .into_iter()
            .map(Line::from)
            .collect();
        Paragraph::new(summary)
            .wrap(Wrap { trim: true })
            .block(card("Numeric Columns", ctx.success))
            .render(cards[1], buf);

        let actions: Vec<Line> = QUICK_ACTIONS
            .iter()
            .map(|(key, label)| field(key, *label))
            .collect();
        Paragraph::new(actions)
            .block(card("Quick Actions", ctx.secondary))
            .render(cards[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::row_from_pairs;
    use crate::metrics::calculate_metrics;

    fn wide_metrics(numeric: usize) -> Metrics {
        let row = row_from_pairs(
            std::iter::once(("Name".to_string(), "x".to_string()))
                .chain((0..numeric).map(|i| (format!("N{i}"), i.to_string()))),
        );
        calculate_metrics(&[row])
    }

    #[test]
    fn test_numeric_summary_limits_columns() {
        let lines = numeric_summary(&wide_metrics(7), 5);
        assert_eq!(lines[0], "Count: 7");
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[6], "... and 2 more");
    }

    #[test]
    fn test_numeric_summary_without_numbers() {
        assert_eq!(
            numeric_summary(&wide_metrics(0), 5),
            vec![NO_NUMERIC_COLUMNS.to_string()]
        );
    }

    #[test]
    fn test_dataset_info() {
        let metrics = wide_metrics(2);
        let source = SourceInfo::new("sales.xlsx")
            .with_sheets(vec!["Q1".to_string(), "Q2".to_string()], 1);
        let info = dataset_info(&metrics, &source);
        assert_eq!(info[0], ("File", "sales.xlsx".to_string()));
        assert_eq!(info[1], ("Sheet", "Q2 (2 of 2)".to_string()));
        assert_eq!(info[4], ("Data Density", "3 cells".to_string()));
    }

    #[test]
    fn test_render_shows_cards() {
        let metrics = wide_metrics(1);
        let source = SourceInfo::new("sales.xlsx");
        let ctx = RenderContext::default();
        let area = Rect::new(0, 0, 120, 12);
        let mut buf = Buffer::empty(area);
        DashboardView {
            metrics: &metrics,
            source: &source,
            ctx: &ctx,
        }
        .render(area, &mut buf);
        let text = crate::views::buffer_text(&buf);
        assert!(text.contains("Dataset Information"));
        assert!(text.contains("Numeric Columns"));
        assert!(text.contains("Total Records: 1"));
    }
}
