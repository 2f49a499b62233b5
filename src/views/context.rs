use ratatui::style::Color;

use crate::config::{DisplayConfig, Theme};
use crate::tiles::Trend;

/// Snapshot of theme colors and display configuration for rendering.
/// Passed to views to avoid threading many individual parameters.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
    pub dimmed: Color,
    pub controls_bg: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_inverse: Color,
    pub table_header: Color,
    pub table_border: Color,
    pub chart_bar: Color,
    pub chart_line: Color,
    pub trend_up: Color,
    pub trend_down: Color,
    pub trend_neutral: Color,

    pub chart_data_limit: usize,
    pub max_numeric_columns: usize,
}

impl RenderContext {
    /// Build render context from app theme and config.
    /// This is a snapshot; changes to theme won't affect this instance.
    pub fn from_theme_and_config(theme: &Theme, display: &DisplayConfig) -> Self {
        Self {
            primary: theme.get("primary"),
            secondary: theme.get("secondary"),
            success: theme.get("success"),
            error: theme.get("error"),
            warning: theme.get("warning"),
            info: theme.get("info"),
            dimmed: theme.get("dimmed"),
            controls_bg: theme.get("controls_bg"),
            text_primary: theme.get("text_primary"),
            text_secondary: theme.get("text_secondary"),
            text_inverse: theme.get("text_inverse"),
            table_header: theme.get("table_header"),
            table_border: theme.get("table_border"),
            chart_bar: theme.get("chart_bar"),
            chart_line: theme.get("chart_line"),
            trend_up: theme.get("trend_up"),
            trend_down: theme.get("trend_down"),
            trend_neutral: theme.get("trend_neutral"),

            chart_data_limit: display.chart_data_limit,
            max_numeric_columns: display.max_numeric_columns,
        }
    }

    pub fn trend(&self, trend: Trend) -> Color {
        match trend {
            Trend::Up => self.trend_up,
            Trend::Down => self.trend_down,
            Trend::Neutral => self.trend_neutral,
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::from_theme_and_config(&Theme::default(), &DisplayConfig::default())
    }
}
