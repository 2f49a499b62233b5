use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph, Widget},
};

use super::{card, render_message, RenderContext};
use crate::chart_data::{best_chart_columns, prepare_chart_data, ChartData, ChartKind};
use crate::dataset::Row;
use crate::metrics::Metrics;

pub const NO_NUMERIC_COLUMNS: &str = "No numeric columns found for charting";
const LABEL_WIDTH: usize = 8;

/// Chart of the first numeric column against the first column as labels.
pub struct ChartsView<'a> {
    pub rows: &'a [Row],
    pub metrics: &'a Metrics,
    pub kind: ChartKind,
    pub ctx: &'a RenderContext,
}

fn short_label(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        label.to_string()
    } else {
        let mut s: String = label.chars().take(LABEL_WIDTH - 1).collect();
        s.push('…');
        s
    }
}

fn format_axis_label(v: f64) -> String {
    if v.abs() >= 1e6 || (v.abs() < 1e-2 && v != 0.0) {
        format!("{:.2e}", v)
    } else {
        format!("{:.2}", v)
    }
}

impl ChartsView<'_> {
    fn render_bars(&self, data: &ChartData, area: Rect, buf: &mut Buffer) {
        let Some(series) = data.series.first() else {
            return;
        };
        let (lo, _) = data.value_bounds();
        let bars: Vec<Bar> = data
            .labels
            .iter()
            .zip(&series.values)
            .map(|(label, value)| {
                Bar::default()
                    .value((value - lo).round().max(0.0) as u64)
                    .text_value(format_axis_label(*value))
                    .label(Line::from(short_label(label)))
            })
            .collect();
        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width(area.width, bars.len()))
            .bar_gap(1)
            .bar_style(Style::default().fg(self.ctx.chart_bar))
            .value_style(Style::default().fg(self.ctx.text_inverse).bg(self.ctx.chart_bar))
            .render(area, buf);
    }

    fn render_xy(&self, data: &ChartData, graph_type: GraphType, area: Rect, buf: &mut Buffer) {
        let Some(series) = data.series.first() else {
            return;
        };
        let points = data.points(0);
        let (lo, hi) = data.value_bounds();
        let hi = if hi > lo { hi } else { lo + 1.0 };
        let x_max = (points.len().saturating_sub(1) as f64).max(1.0);

        let dataset = Dataset::default()
            .name(series.name.as_str())
            .marker(Marker::Braille)
            .graph_type(graph_type)
            .style(Style::default().fg(self.ctx.chart_line))
            .data(&points);

        let label_style = Style::default().fg(self.ctx.text_primary);
        let first = data.labels.first().map(|l| short_label(l)).unwrap_or_default();
        let last = data.labels.last().map(|l| short_label(l)).unwrap_or_default();
        let x_axis = Axis::default()
            .bounds([0.0, x_max])
            .style(label_style)
            .labels(vec![Span::styled(first, label_style), Span::styled(last, label_style)]);
        let y_axis = Axis::default()
            .bounds([lo, hi])
            .style(label_style)
            .labels(vec![
                Span::styled(format_axis_label(lo), label_style),
                Span::styled(format_axis_label((lo + hi) / 2.0), label_style),
                Span::styled(format_axis_label(hi), label_style),
            ]);

        Chart::new(vec![dataset])
            .x_axis(x_axis)
            .y_axis(y_axis)
            .render(area, buf);
    }
}

impl Widget for ChartsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let columns = best_chart_columns(self.metrics)
            .filter(|_| !self.metrics.numeric_columns.is_empty());
        let Some(columns) = columns else {
            render_message(NO_NUMERIC_COLUMNS, ctx.text_secondary, area, buf);
            return;
        };

        let data = prepare_chart_data(
            self.rows,
            &columns.label,
            &columns.value,
            ctx.chart_data_limit,
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Fill(1)])
            .split(area);
        Paragraph::new(format!(
            "{} of {} by {} (first {} records)",
            self.kind.title(),
            columns.value,
            columns.label,
            data.labels.len()
        ))
        .style(Style::default().fg(ctx.info))
        .render(rows[0], buf);

        let block = card(self.kind.title(), ctx.primary);
        let inner = block.inner(rows[1]);
        block.render(rows[1], buf);

        if data.is_empty() {
            render_message("No rows match the current filters", ctx.text_secondary, inner, buf);
            return;
        }
        match self.kind {
            ChartKind::Bar => self.render_bars(&data, inner, buf),
            ChartKind::Line => self.render_xy(&data, GraphType::Line, inner, buf),
            ChartKind::Scatter => self.render_xy(&data, GraphType::Scatter, inner, buf),
        }
    }
}

fn bar_width(area_width: u16, bars: usize) -> u16 {
    let count = u16::try_from(bars).unwrap_or(u16::MAX).max(1);
    (area_width / count).saturating_sub(1).clamp(1, 12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::row_from_pairs;
    use crate::metrics::calculate_metrics;

    fn render(rows: &[Row], kind: ChartKind) -> String {
        let metrics = calculate_metrics(rows);
        let ctx = RenderContext::default();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        ChartsView {
            rows,
            metrics: &metrics,
            kind,
            ctx: &ctx,
        }
        .render(area, &mut buf);
        crate::views::buffer_text(&buf)
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("North"), "North");
        assert_eq!(short_label("Northwestern"), "Northwe…");
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(80, 4), 12);
        assert_eq!(bar_width(80, 20), 3);
        assert_eq!(bar_width(80, 0), 12);
        assert_eq!(bar_width(80, 65_536), 1);
        assert_eq!(bar_width(80, usize::MAX), 1);
    }

    #[test]
    fn test_bar_chart_with_more_bars_than_u16() {
        let rows: Vec<Row> = (0..65_536)
            .map(|i| row_from_pairs([("Id", i.to_string()), ("Value", (i % 7).to_string())]))
            .collect();
        let metrics = calculate_metrics(&rows);
        let ctx = RenderContext {
            chart_data_limit: 65_536,
            ..RenderContext::default()
        };
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        ChartsView {
            rows: &rows,
            metrics: &metrics,
            kind: ChartKind::Bar,
            ctx: &ctx,
        }
        .render(area, &mut buf);
        assert!(crate::views::buffer_text(&buf).contains("Value"));
    }

    #[test]
    fn test_no_numeric_columns_message() {
        let rows = vec![row_from_pairs([("Name", "Ann"), ("City", "NYC")])];
        assert!(render(&rows, ChartKind::Bar).contains(NO_NUMERIC_COLUMNS));
    }

    #[test]
    fn test_chart_header_names_columns() {
        let rows = vec![
            row_from_pairs([("Region", "North"), ("Sales", "10")]),
            row_from_pairs([("Region", "South"), ("Sales", "20")]),
        ];
        let text = render(&rows, ChartKind::Line);
        assert!(text.contains("Line Chart of Sales by Region (first 2 records)"));
        let text = render(&rows, ChartKind::Bar);
        assert!(text.contains("North"));
    }
}
