use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table, Widget},
};

use super::{card, RenderContext};

/// Named glyphs used across the application.
pub const ICONS: [(&str, &str, &str); 20] = [
    ("upload", "📤", "Open a spreadsheet"),
    ("download", "📥", "Export the current view"),
    ("chart", "📊", "Charts, neutral trend"),
    ("tiles", "🎨", "Tile showcase"),
    ("data", "📋", "Data table"),
    ("info", "ℹ️", "Information notices"),
    ("checkmark", "✅", "Success"),
    ("file", "📁", "Source file"),
    ("settings", "⚙️", "Configuration"),
    ("save", "💾", "Saved exports"),
    ("dashboard", "📈", "Dashboard, upward trend"),
    ("numbers", "🔢", "Numeric columns"),
    ("trend-down", "📉", "Downward trend"),
    ("warning", "⚠️", "Warnings"),
    ("error", "❌", "Errors"),
    ("sort-ascending", "▲", "Ascending sort"),
    ("sort-descending", "▼", "Descending sort"),
    ("sortable", "▲▼", "Unsorted column"),
    ("increase", "↑", "Comparison increase"),
    ("decrease", "↓", "Comparison decrease"),
];

pub struct IconsView<'a> {
    pub ctx: &'a RenderContext,
}

impl Widget for IconsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(vec!["Icon", "Name", "Usage"])
            .style(Style::default().fg(self.ctx.table_header).add_modifier(Modifier::BOLD));
        let rows = ICONS.iter().map(|(name, glyph, usage)| {
            Row::new(vec![
                Cell::from(*glyph),
                Cell::from(*name),
                Cell::from(*usage),
            ])
        });
        Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Length(16),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .column_spacing(2)
        .block(card("Icons", self.ctx.primary))
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_names_are_unique() {
        let mut names: Vec<&str> = ICONS.iter().map(|(name, _, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ICONS.len());
    }

    #[test]
    fn test_render_lists_names() {
        let ctx = RenderContext::default();
        let area = Rect::new(0, 0, 60, 24);
        let mut buf = Buffer::empty(area);
        IconsView { ctx: &ctx }.render(area, &mut buf);
        let text = crate::views::buffer_text(&buf);
        assert!(text.contains("sort-ascending"));
        assert!(text.contains("Export the current view"));
    }
}
