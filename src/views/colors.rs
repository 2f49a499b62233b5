use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{card, RenderContext};
use crate::config::{ColorConfig, ColorParser, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub hex: &'static str,
    pub usage: &'static str,
}

const fn swatch(name: &'static str, hex: &'static str, usage: &'static str) -> Swatch {
    Swatch { name, hex, usage }
}

/// Fiori-style palette grouped by role.
pub const SCHEMES: [(&str, &[Swatch]); 6] = [
    (
        "Primary Blue",
        &[
            swatch("Blue Dark", "#064080", "Hover states, emphasis"),
            swatch("Blue", "#0854a0", "Primary actions, links"),
            swatch("Blue Light", "#e3f2fd", "Backgrounds, subtle highlights"),
        ],
    ),
    (
        "Success Green",
        &[
            swatch("Green", "#107e3e", "Success states, positive indicators"),
            swatch("Green Light", "#e8f5e9", "Success backgrounds"),
        ],
    ),
    (
        "Warning Orange",
        &[
            swatch("Orange", "#e26800", "Warning states, caution"),
            swatch("Orange Light", "#fff3e0", "Warning backgrounds"),
        ],
    ),
    (
        "Error Red",
        &[
            swatch("Red", "#bb0000", "Error states, critical alerts"),
            swatch("Red Light", "#ffebee", "Error backgrounds"),
        ],
    ),
    (
        "Accent Purple",
        &[
            swatch("Purple", "#91007b", "Accent color, special features"),
            swatch("Purple Light", "#f3e5f5", "Accent backgrounds"),
        ],
    ),
    (
        "Neutral Grays",
        &[
            swatch("Gray", "#666666", "Body text, secondary information"),
            swatch("Gray Light", "#999999", "Disabled text, tertiary info"),
            swatch("Gray Lighter", "#f5f5f5", "Backgrounds, dividers"),
            swatch("Border", "#dddddd", "Borders, separators"),
        ],
    ),
];

/// Palette showcase next to the colors of the active theme.
pub struct ColorsView<'a> {
    pub parser: &'a ColorParser,
    pub theme_config: &'a ColorConfig,
    pub theme: &'a Theme,
    pub ctx: &'a RenderContext,
}

fn swatch_line(color: Color, label: String) -> Line<'static> {
    Line::from(vec![
        Span::styled("████", Style::default().fg(color)),
        Span::raw(" "),
        Span::raw(label),
    ])
}

impl Widget for ColorsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let mut lines = Vec::new();
        for (scheme, swatches) in SCHEMES.iter() {
            lines.push(Line::from(Span::styled(
                *scheme,
                Style::default().fg(self.ctx.text_primary),
            )));
            for s in swatches.iter() {
                let color = self.parser.parse(s.hex).unwrap_or(Color::Reset);
                lines.push(swatch_line(
                    color,
                    format!("{:<13} {}  {}", s.name, s.hex.to_uppercase(), s.usage),
                ));
            }
        }
        Paragraph::new(lines)
            .block(card("Palette", self.ctx.primary))
            .render(cols[0], buf);

        let theme_lines: Vec<Line> = self
            .theme_config
            .entries()
            .into_iter()
            .map(|(name, value)| swatch_line(self.theme.get(name), format!("{name} = {value}")))
            .collect();
        Paragraph::new(theme_lines)
            .block(card("Theme", self.ctx.secondary))
            .render(cols[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_hex_values_parse() {
        let parser = ColorParser::new();
        for (_, swatches) in SCHEMES.iter() {
            for s in swatches.iter() {
                assert!(parser.parse(s.hex).is_ok(), "{} should parse", s.hex);
            }
        }
    }

    #[test]
    fn test_render_lists_theme_entries() {
        let parser = ColorParser::new();
        let config = ColorConfig::default();
        let theme = Theme::default();
        let ctx = RenderContext::default();
        let area = Rect::new(0, 0, 140, 30);
        let mut buf = Buffer::empty(area);
        ColorsView {
            parser: &parser,
            theme_config: &config,
            theme: &theme,
            ctx: &ctx,
        }
        .render(area, &mut buf);
        let text = crate::views::buffer_text(&buf);
        assert!(text.contains("Primary Blue"));
        assert!(text.contains("#0854A0"));
        assert!(text.contains("primary = #0854a0"));
    }
}
