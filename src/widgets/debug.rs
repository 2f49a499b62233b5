use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, Widget},
};

use crate::route::Route;

#[derive(Debug, Default)]
pub struct DebugState {
    pub enabled: bool,
    pub show_performance: bool,
    pub num_events: usize,
    pub num_frames: usize,
    pub num_key_events: usize,
    pub last_key_event_name: String,
    /// Last action taken (e.g. "toggle_sort") for debugging key handling.
    pub last_action: String,
    pub route: Route,
}

impl DebugState {
    pub fn on_key(&mut self, event: &crossterm::event::KeyEvent) {
        self.num_key_events += 1;
        self.last_key_event_name = format!("{:?}", event.code);
    }
}

impl Widget for &DebugState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = if self.show_performance {
            format!(
                "events={} keys={} last_key={} last_action={} frames={} route={}",
                self.num_events,
                self.num_key_events,
                self.last_key_event_name,
                self.last_action,
                self.num_frames,
                self.route
            )
        } else {
            format!(
                "last_key={} last_action={} route={}",
                self.last_key_event_name, self.last_action, self.route
            )
        };
        Paragraph::new(text).render(area, buf);
    }
}
