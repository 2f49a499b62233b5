//! Full-screen views, one per [`Route`](crate::route::Route).
//!
//! Views only read: they take query results and metrics from the store and
//! never mutate it.

pub mod about;
pub mod charts;
pub mod colors;
pub mod components;
pub mod context;
pub mod dashboard;
pub mod data;
pub mod detail;
pub mod home;
pub mod icons;
pub mod tiles;
pub mod upload;

pub use context::RenderContext;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// Bordered panel with a bold title.
pub(crate) fn card(title: &str, border: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ))
}

/// `label: value` line with a bold label.
pub(crate) fn field<'a>(label: &'a str, value: impl Into<String>) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.into()),
    ])
}

pub(crate) fn render_message(message: &str, color: Color, area: Rect, buf: &mut Buffer) {
    let y = area.y + area.height / 2;
    let line = Rect::new(area.x, y, area.width, 1.min(area.height));
    Paragraph::new(message)
        .style(Style::default().fg(color))
        .centered()
        .render(line, buf);
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    (area.y..area.bottom())
        .map(|y| {
            (area.x..area.right())
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
