use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Paragraph, Widget},
};

use super::{card, RenderContext};
use crate::dataset::SourceInfo;
use crate::metrics::Metrics;
use crate::tiles::{
    comparison_tile, format_number, group_thousands, metric_tiles, micro_chart, slides,
};

/// Generic metric tiles shown in one row.
pub const MAX_METRIC_TILES: usize = 4;

/// Showcase of the tile kinds, driven by the dataset metrics.
pub struct TilesView<'a> {
    pub metrics: &'a Metrics,
    pub source: &'a SourceInfo,
    pub slide_index: usize,
    /// Index into the metric tiles row
    pub selected_metric: usize,
    pub ctx: &'a RenderContext,
}

fn big(value: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        value.into(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .centered()
}

fn caption(text: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(color))).centered()
}

impl TilesView<'_> {
    fn render_overview(&self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let m = self.metrics;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(2, 4),
                Constraint::Ratio(1, 4),
                Constraint::Ratio(1, 4),
            ])
            .split(area);

        Paragraph::new(vec![
            Line::from(format!(
                "Total Records: {}    Data Columns: {}",
                group_thousands(m.row_count),
                m.column_count
            )),
            Line::from(format!(
                "Numeric Columns: {}",
                m.numeric_columns.len()
            )),
            Line::from(Span::styled(
                format!("Density: {} cells", group_thousands(m.cell_count())),
                Style::default().fg(ctx.text_secondary),
            )),
        ])
        .block(card("Dataset Overview", ctx.primary))
        .render(cols[0], buf);

        Paragraph::new(vec![
            big(group_thousands(m.row_count), ctx.primary),
            caption("Total Records", ctx.text_secondary),
        ])
        .block(card("Records", ctx.primary))
        .render(cols[1], buf);

        Paragraph::new(vec![
            big(m.column_count.to_string(), ctx.success),
            caption("Available fields", ctx.text_secondary),
        ])
        .block(card("Columns", ctx.success))
        .render(cols[2], buf);
    }

    fn render_metrics(&self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let tiles = metric_tiles(self.metrics, MAX_METRIC_TILES);
        if tiles.is_empty() {
            Paragraph::new(caption("No numeric columns detected", ctx.text_secondary))
                .block(card("Metrics", ctx.dimmed))
                .render(area, buf);
            return;
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, tiles.len() as u32); tiles.len()])
            .split(area);
        for (i, tile) in tiles.iter().enumerate() {
            let border = if i == self.selected_metric {
                ctx.primary
            } else {
                ctx.dimmed
            };
            Paragraph::new(vec![
                big(tile.total.clone(), ctx.text_primary),
                caption(format!("Avg: {}", tile.average), ctx.text_secondary),
                Line::from(Span::styled(
                    tile.trend.glyph(),
                    Style::default().fg(ctx.trend(tile.trend)),
                ))
                .centered(),
            ])
            .block(card(&tile.column, border))
            .render(cols[i], buf);
        }
    }

    fn render_bottom(&self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        let all_slides = slides(self.metrics);
        let slide = &all_slides[self.slide_index % all_slides.len()];
        let dots: String = (0..all_slides.len())
            .map(|i| if i == self.slide_index % all_slides.len() { '●' } else { '○' })
            .collect();
        Paragraph::new(vec![
            caption(slide.header, ctx.secondary),
            big(slide.value.clone(), ctx.text_primary),
            caption(slide.footer.clone(), ctx.text_secondary),
            caption(format!("‹ {dots} ›"), ctx.dimmed),
        ])
        .block(card("Slide", ctx.secondary))
        .render(cols[0], buf);

        match comparison_tile(self.metrics) {
            Some(tile) => {
                let color = if tile.is_increase() {
                    ctx.trend_up
                } else {
                    ctx.trend_down
                };
                Paragraph::new(vec![
                    Line::from(format!(
                        "Current (avg): {}",
                        format_number(tile.current)
                    )),
                    Line::from(format!(
                        "Previous (min): {}",
                        format_number(tile.previous)
                    )),
                    Line::from(Span::styled(tile.delta_label(), Style::default().fg(color))),
                ])
                .block(card(&format!("{} Comparison", tile.column), ctx.info))
                .render(cols[1], buf);
            }
            None => Paragraph::new(caption("No numeric data", ctx.text_secondary))
                .block(card("Comparison", ctx.dimmed))
                .render(cols[1], buf),
        }

        match micro_chart(self.metrics) {
            Some(chart) => {
                let bars: Vec<Bar> = chart
                    .heights
                    .iter()
                    .map(|h| Bar::default().value(*h).text_value(String::new()))
                    .collect();
                let block = card(&chart.column, ctx.chart_bar);
                let inner = block.inner(cols[2]);
                block.render(cols[2], buf);
                let bar_width = (inner.width.saturating_sub(4) / 5).max(1);
                BarChart::default()
                    .data(BarGroup::default().bars(&bars))
                    .bar_width(bar_width)
                    .bar_gap(1)
                    .max(100)
                    .bar_style(Style::default().fg(ctx.chart_bar))
                    .render(inner, buf);
            }
            None => Paragraph::new(caption("No numeric data", ctx.text_secondary))
                .block(card("Micro Chart", ctx.dimmed))
                .render(cols[2], buf),
        }
    }

    fn render_feed(&self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
            .split(area);

        Paragraph::new(vec![
            Line::from(format!(
                "{} successfully loaded and ready for analysis.",
                self.source.file_name
            )),
            Line::from(format!(
                "{} numeric columns detected.",
                self.metrics.numeric_columns.len()
            )),
        ])
        .block(card("Feed", ctx.info))
        .render(cols[0], buf);

        Paragraph::new(vec![
            caption("📤 Upload New File", ctx.text_primary),
            caption("Press 2 or o", ctx.text_secondary),
        ])
        .block(card("Action", ctx.secondary))
        .render(cols[1], buf);
    }
}

impl Widget for TilesView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Min(6),
                Constraint::Length(4),
            ])
            .split(area);
        self.render_overview(rows[0], buf);
        self.render_metrics(rows[1], buf);
        self.render_bottom(rows[2], buf);
        self.render_feed(rows[3], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::row_from_pairs;
    use crate::metrics::calculate_metrics;

    #[test]
    fn test_render_tiles() {
        let metrics = calculate_metrics(&[
            row_from_pairs([("Region", "North"), ("Sales", "1000")]),
            row_from_pairs([("Region", "South"), ("Sales", "3000")]),
        ]);
        let source = SourceInfo::new("sales.xlsx");
        let ctx = RenderContext::default();
        let area = Rect::new(0, 0, 120, 24);
        let mut buf = Buffer::empty(area);
        TilesView {
            metrics: &metrics,
            source: &source,
            slide_index: 1,
            selected_metric: 0,
            ctx: &ctx,
        }
        .render(area, &mut buf);

        let text = crate::views::buffer_text(&buf);
        assert!(text.contains("Dataset Overview"));
        assert!(text.contains("Sales"));
        assert!(text.contains("THIS WEEK"));
        assert!(text.contains("Previous (min): 1.0K"));
        assert!(text.contains("sales.xlsx successfully loaded"));
    }
}
