use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{card, RenderContext};

pub const STEPS: [(&str, &str); 4] = [
    ("📁", "Choose your Excel file"),
    ("⚙️", "Process the data"),
    ("📊", "View insights"),
    ("💾", "Export results"),
];

pub struct HomeView<'a> {
    /// Loaded file name, if any
    pub loaded: Option<&'a str>,
    pub ctx: &'a RenderContext,
}

impl Widget for HomeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(5),
                Constraint::Fill(1),
            ])
            .split(area);

        Paragraph::new(vec![
            Line::from(Span::styled(
                "Welcome to sheetdash",
                Style::default().fg(ctx.primary).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from("Open an Excel file to start analyzing your data").centered(),
            match self.loaded {
                Some(file) => Line::from(Span::styled(
                    format!("Currently loaded: {file}"),
                    Style::default().fg(ctx.success),
                ))
                .centered(),
                None => Line::from(Span::styled(
                    "No file loaded. Press o to open one.",
                    Style::default().fg(ctx.text_secondary),
                ))
                .centered(),
            },
        ])
        .render(rows[0], buf);

        let steps = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(rows[1]);
        for (i, (icon, label)) in STEPS.iter().enumerate() {
            Paragraph::new(vec![Line::from(*icon).centered(), Line::from(*label).centered()])
                .wrap(Wrap { trim: true })
                .block(card(&format!("Step {}", i + 1), ctx.primary))
                .render(steps[i], buf);
        }

        Paragraph::new(vec![
            Line::from("Digits 1-9 and 0 switch pages; Tab and Shift-Tab cycle through them."),
            Line::from("Pages that need data redirect to Upload until a file is loaded."),
            Line::from("o opens a file, [ and ] switch sheets, e exports, q quits."),
        ])
        .wrap(Wrap { trim: true })
        .block(card("Getting Started", ctx.secondary))
        .render(rows[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_reports_loaded_file() {
        let ctx = RenderContext::default();
        let area = Rect::new(0, 0, 100, 16);

        let mut buf = Buffer::empty(area);
        HomeView { loaded: None, ctx: &ctx }.render(area, &mut buf);
        assert!(crate::views::buffer_text(&buf).contains("No file loaded"));

        let mut buf = Buffer::empty(area);
        HomeView {
            loaded: Some("sales.xlsx"),
            ctx: &ctx,
        }
        .render(area, &mut buf);
        let text = crate::views::buffer_text(&buf);
        assert!(text.contains("Currently loaded: sales.xlsx"));
        assert!(text.contains("Step 4"));
    }
}
