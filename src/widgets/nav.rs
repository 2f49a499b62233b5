use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Tabs, Widget},
};

use crate::route::Route;

/// Navigation bar listing [`Route::NAV`] with their digit shortcuts.
pub struct NavBar {
    pub current: Route,
    pub has_data: bool,
    pub active_color: Color,
    pub dimmed_color: Color,
}

/// Position of `route` in the navigation bar. Row detail highlights the data tab.
pub fn nav_index(route: Route) -> Option<usize> {
    let route = match route {
        Route::DataDetail(_) => Route::Data,
        other => other,
    };
    Route::NAV.iter().position(|r| *r == route)
}

fn shortcut(index: usize) -> char {
    char::from_digit(((index + 1) % 10) as u32, 10).unwrap_or(' ')
}

impl Widget for &NavBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let titles: Vec<ratatui::text::Line> = Route::NAV
            .iter()
            .enumerate()
            .map(|(i, route)| {
                let style = if route.requires_data() && !self.has_data {
                    Style::default().fg(self.dimmed_color)
                } else {
                    Style::default()
                };
                ratatui::text::Line::styled(format!("{} {}", shortcut(i), route.title()), style)
            })
            .collect();

        let mut tabs = Tabs::new(titles).highlight_style(
            Style::default()
                .fg(self.active_color)
                .add_modifier(Modifier::REVERSED),
        );
        if let Some(selected) = nav_index(self.current) {
            tabs = tabs.select(selected);
        }
        tabs.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_index() {
        assert_eq!(nav_index(Route::Home), Some(0));
        assert_eq!(nav_index(Route::DataDetail(4)), nav_index(Route::Data));
        assert_eq!(nav_index(Route::About), Some(9));
    }

    #[test]
    fn test_shortcuts_match_route_digits() {
        for (i, route) in Route::NAV.iter().enumerate() {
            assert_eq!(Route::from_digit(shortcut(i)), Some(*route));
        }
    }
}
