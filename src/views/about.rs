use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{card, RenderContext};

const FEATURES: [&str; 7] = [
    "Open Excel files (.xlsx, .xls)",
    "Automatic data processing and validation",
    "Dashboard with dataset and numeric column summaries",
    "Bar, line and scatter charts",
    "Sortable and filterable data table with row details",
    "Export to Excel, CSV or JSON",
    "Fully local processing",
];

const STACK: [&str; 4] = [
    "calamine - spreadsheet decoding",
    "rust_xlsxwriter - Excel export",
    "polars - CSV and JSON export",
    "ratatui + crossterm - terminal interface",
];

pub struct AboutView<'a> {
    pub ctx: &'a RenderContext,
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

impl Widget for AboutView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::from(format!(
                "sheetdash - Version {}",
                env!("CARGO_PKG_VERSION")
            )),
            Line::from(""),
            heading("Features"),
        ];
        lines.extend(FEATURES.iter().map(|f| Line::from(format!("  • {f}"))));
        lines.push(Line::from(""));
        lines.push(heading("Technology Stack"));
        lines.extend(STACK.iter().map(|s| Line::from(format!("  • {s}"))));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "All processing happens locally. Your data never leaves your machine.",
            Style::default().fg(self.ctx.text_secondary),
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(card("About", self.ctx.primary))
            .render(area, buf);
    }
}
