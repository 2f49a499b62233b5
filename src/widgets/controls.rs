use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
};

use crate::route::Route;

/// A key and the action it triggers.
pub type KeyHint = (&'static str, &'static str);

const GLOBAL: [KeyHint; 3] = [("0-9", "Page"), ("o", "Open"), ("q", "Quit")];

const DATA: [KeyHint; 8] = [
    ("↵", "Detail"),
    ("/", "Filter"),
    ("s", "Sort"),
    ("S", "Unsort"),
    ("c", "Clear"),
    ("e", "Export"),
    ("E", "Export col"),
    ("q", "Quit"),
];

const CHARTS: [KeyHint; 3] = [("t", "Chart type"), ("[ ]", "Sheet"), ("q", "Quit")];

const TILES: [KeyHint; 5] = [
    ("← →", "Slide"),
    ("↑ ↓", "Metric"),
    ("↵", "Details"),
    ("[ ]", "Sheet"),
    ("q", "Quit"),
];

const DETAIL: [KeyHint; 3] = [("← →", "Row"), ("Esc", "Back"), ("q", "Quit")];

const DASHBOARD: [KeyHint; 4] = [("Tab", "Next"), ("[ ]", "Sheet"), ("e", "Export"), ("q", "Quit")];

/// Key hints shown in the controls bar for `route`.
pub fn hints_for(route: Route) -> &'static [KeyHint] {
    match route {
        Route::Data => &DATA,
        Route::DataDetail(_) => &DETAIL,
        Route::ChartTypes => &CHARTS,
        Route::Tiles => &TILES,
        Route::Dashboard => &DASHBOARD,
        _ => &GLOBAL,
    }
}

pub struct Controls {
    pub hints: &'static [KeyHint],
    pub row_count: Option<usize>,
    pub dimmed: bool,
    pub background: Color,
    pub highlight: Color,
}

impl Controls {
    pub fn new(hints: &'static [KeyHint]) -> Self {
        Self {
            hints,
            row_count: None,
            dimmed: false,
            background: Color::DarkGray,
            highlight: Color::White,
        }
    }

    pub fn for_route(route: Route) -> Self {
        Self::new(hints_for(route))
    }

    pub fn with_row_count(mut self, row_count: Option<usize>) -> Self {
        self.row_count = row_count;
        self
    }

    pub fn with_dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    pub fn with_colors(mut self, background: Color, highlight: Color) -> Self {
        self.background = background;
        self.highlight = highlight;
        self
    }
}

impl Widget for &Controls {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut constraints = self.hints.iter().fold(vec![], |mut acc, (key, action)| {
            acc.push(Constraint::Length(key.chars().count() as u16 + 2));
            acc.push(Constraint::Length(action.chars().count() as u16 + 1));
            acc
        });

        if self.row_count.is_some() {
            constraints.push(Constraint::Length(15)); // "Rows: 12345"
        }
        constraints.push(Constraint::Fill(1));

        let layout = Layout::new(Direction::Horizontal, constraints).split(area);

        let base_style = if self.dimmed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        for (i, (key, action)) in self.hints.iter().enumerate() {
            let j = i * 2;
            Paragraph::new(*key)
                .style(base_style.add_modifier(Modifier::BOLD))
                .centered()
                .render(layout[j], buf);
            Paragraph::new(*action)
                .style(base_style.bg(self.background))
                .render(layout[j + 1], buf);
        }

        let mut fill_start_idx = self.hints.len() * 2;
        if let Some(count) = self.row_count {
            Paragraph::new(format!("Rows: {}", count))
                .style(base_style.bg(self.background).fg(if self.dimmed {
                    Color::DarkGray
                } else {
                    self.highlight
                }))
                .right_aligned()
                .render(layout[fill_start_idx], buf);
            fill_start_idx += 1;
        }

        Paragraph::new("")
            .style(base_style.bg(self.background))
            .render(layout[fill_start_idx], buf);
    }
}
