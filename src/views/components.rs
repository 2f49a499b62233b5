use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget},
};

use super::{card, field, RenderContext};
use crate::widgets::text_input::TextInput;

/// Building blocks the application renders, each with a live sample.
pub const COMPONENTS: [(&str, &str); 6] = [
    ("Card", "Bordered panel grouping related information"),
    ("Gauge", "Progress indicator, used while loading"),
    ("Input", "Single-line text entry for filters and paths"),
    ("Table", "Scrollable, sortable data grid"),
    ("Chart", "Bar, line and scatter plots"),
    ("Toast", "Timed notification in the top-right corner"),
];

pub struct ComponentsView<'a> {
    pub ctx: &'a RenderContext,
}

impl Widget for ComponentsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Fill(1)])
            .split(area);

        let catalog: Vec<Line> = COMPONENTS
            .iter()
            .map(|(name, description)| field(name, *description))
            .collect();
        Paragraph::new(catalog)
            .block(card("Components", ctx.primary))
            .render(rows[0], buf);

        let samples = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[1]);

        let status = card("Project Status", ctx.success);
        let inner = status.inner(samples[0]);
        status.render(samples[0], buf);
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(1)])
            .split(inner);
        Paragraph::new(vec![
            Line::from("Development Phase"),
            Line::from(Span::styled("On Track", Style::default().fg(ctx.success))),
        ])
        .render(parts[0], buf);
        Gauge::default()
            .gauge_style(Style::default().fg(ctx.success))
            .percent(85)
            .label("85% Complete")
            .render(parts[1], buf);

        let input_area = Rect {
            height: samples[1].height.min(3),
            ..samples[1]
        };
        (&TextInput::new("Search").with_value("Enter a query").with_border_color(ctx.info))
            .render(input_area, buf);

        Paragraph::new(vec![
            Line::from(Span::styled(
                "$2.4M",
                Style::default().fg(ctx.text_primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled("↑ 12.5%", Style::default().fg(ctx.trend_up))),
            Line::from(Span::styled(
                "vs last quarter",
                Style::default().fg(ctx.text_secondary),
            )),
        ])
        .block(card("Revenue", ctx.secondary))
        .render(samples[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_catalog_and_samples() {
        let ctx = RenderContext::default();
        let area = Rect::new(0, 0, 100, 16);
        let mut buf = Buffer::empty(area);
        ComponentsView { ctx: &ctx }.render(area, &mut buf);
        let text = crate::views::buffer_text(&buf);
        assert!(text.contains("Gauge: Progress indicator"));
        assert!(text.contains("85% Complete"));
        assert!(text.contains("vs last quarter"));
    }
}
