use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Top-level layout: navigation bar, main view, optional input strip, control bar, optional debug row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub nav_bar: Rect,
    pub main_view: Rect,
    pub input: Option<Rect>,
    pub control_bar: Rect,
    pub debug: Option<Rect>,
}

pub fn app_layout(area: Rect, input_visible: bool, debug_enabled: bool) -> AppLayout {
    let mut constraints = vec![Constraint::Length(1), Constraint::Fill(1)];
    if input_visible {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(1));
    if debug_enabled {
        constraints.push(Constraint::Length(1));
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let input = input_visible.then(|| layout[2]);
    let control_bar_idx = layout.len() - if debug_enabled { 2 } else { 1 };
    let debug = debug_enabled.then(|| layout[layout.len() - 1]);

    AppLayout {
        nav_bar: layout[0],
        main_view: layout[1],
        input,
        control_bar: layout[control_bar_idx],
        debug,
    }
}

/// Centered rect with fixed width and height, clamped to fit inside `r`.
pub fn centered_rect_fixed(r: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(r.width);
    let h = height.min(r.height);
    let x = r.x + r.width.saturating_sub(w) / 2;
    let y = r.y + r.height.saturating_sub(h) / 2;
    Rect {
        x,
        y,
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout_rows() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = app_layout(area, true, true);
        assert_eq!(layout.nav_bar.height, 1);
        assert_eq!(layout.input.map(|r| r.height), Some(3));
        assert_eq!(layout.control_bar.y, 22);
        assert_eq!(layout.debug.map(|r| r.y), Some(23));
        assert_eq!(layout.main_view.height, 18);

        let plain = app_layout(area, false, false);
        assert!(plain.input.is_none());
        assert_eq!(plain.control_bar.y, 23);
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let r = centered_rect_fixed(Rect::new(0, 0, 20, 10), 40, 4);
        assert_eq!(r, Rect::new(0, 3, 20, 4));
    }
}
