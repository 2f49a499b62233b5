use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::config::Theme;
use crate::notify::Notification;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;

/// Stack of notifications drawn in the top-right corner, newest at the top.
pub struct Toasts<'a> {
    notifications: Vec<&'a Notification>,
    theme: &'a Theme,
}

impl<'a> Toasts<'a> {
    pub fn new(notifications: impl Iterator<Item = &'a Notification>, theme: &'a Theme) -> Self {
        let mut notifications: Vec<_> = notifications.collect();
        notifications.reverse();
        Self {
            notifications,
            theme,
        }
    }
}

/// Area for the `index`-th toast, or `None` once the stack leaves `area`.
fn toast_area(area: Rect, index: u16) -> Option<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let y = area.y + 1 + index * TOAST_HEIGHT;
    if y + TOAST_HEIGHT > area.bottom() {
        return None;
    }
    Some(Rect::new(area.right() - width, y, width, TOAST_HEIGHT))
}

impl Widget for Toasts<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, notification) in self.notifications.iter().enumerate() {
            let Some(rect) = toast_area(area, i as u16) else {
                break;
            };
            let color = self
                .theme
                .get_optional(notification.kind.color_name())
                .unwrap_or(Color::White);
            Clear.render(rect, buf);
            Paragraph::new(notification.message.as_str())
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color))
                        .title(notification.kind.to_string()),
                )
                .render(rect, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_areas_stack_and_stop() {
        let area = Rect::new(0, 0, 100, 8);
        assert_eq!(toast_area(area, 0), Some(Rect::new(56, 1, 44, 3)));
        assert_eq!(toast_area(area, 1), Some(Rect::new(56, 4, 44, 3)));
        assert_eq!(toast_area(area, 2), None);
    }

    #[test]
    fn test_narrow_area_clamps_width() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(toast_area(area, 0).map(|r| r.width), Some(20));
    }
}
