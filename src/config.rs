use color_eyre::eyre::eyre;
use color_eyre::Result;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use supports_color::Stream;

use crate::export::ExportFormat;

pub const CONFIG_VERSION: &str = "0.1";
/// Upper bound for `display.chart_data_limit`.
pub const MAX_CHART_DATA_LIMIT: usize = 1000;

/// Manages config directory and config file operations
#[derive(Clone)]
pub struct ConfigManager {
    pub(crate) config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager with a custom config directory (primarily for testing)
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Create a new ConfigManager for the given app name
    pub fn new(app_name: &str) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| eyre!("Could not determine config directory"))?
            .join(app_name);

        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self, path: &str) -> PathBuf {
        self.config_dir.join(path)
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Default configuration template as a string
    pub fn generate_default_config(&self) -> String {
        DEFAULT_CONFIG_TEMPLATE.to_string()
    }

    /// Write the default template to `config.toml`. Refuses to overwrite unless `force`.
    pub fn write_default_config(&self, force: bool) -> Result<PathBuf> {
        let config_path = self.config_path("config.toml");

        if config_path.exists() && !force {
            return Err(eyre!(
                "Config file already exists at {}. Use --force to overwrite.",
                config_path.display()
            ));
        }

        self.ensure_config_dir()?;
        std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;

        Ok(config_path)
    }

    /// Read and parse `config.toml`. A missing file yields the defaults.
    pub fn load_file(&self) -> Result<AppConfig> {
        let config_path = self.config_path("config.toml");
        if !config_path.exists() {
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            eyre!(
                "Failed to read config file at {}: {}",
                config_path.display(),
                e
            )
        })?;

        toml::from_str(&content).map_err(|e| {
            eyre!(
                "Failed to parse config file at {}: {}",
                config_path.display(),
                e
            )
        })
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration format version
    pub version: String,
    pub upload: UploadConfig,
    pub display: DisplayConfig,
    pub notifications: NotificationConfig,
    pub performance: PerformanceConfig,
    pub export: ExportConfig,
    pub theme: ThemeConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UploadConfig {
    pub max_size_mb: u64,
    pub allowed_extensions: Vec<String>,
    /// 0-based sheet index loaded when a file is opened
    pub default_sheet: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub table_page_size: usize,
    pub chart_data_limit: usize,
    pub max_numeric_columns: usize,
    pub row_numbers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub duration_ms: u64,
    pub max_visible: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub event_poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// One of "xlsx", "csv", "json"
    pub default_format: String,
    pub file_stem: String,
    /// Directory for export files; empty means the current directory
    pub directory: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub colors: ColorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub enabled: bool,
    pub show_performance: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            upload: UploadConfig::default(),
            display: DisplayConfig::default(),
            notifications: NotificationConfig::default(),
            performance: PerformanceConfig::default(),
            export: ExportConfig::default(),
            theme: ThemeConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_mb: 10,
            allowed_extensions: vec![".xlsx".to_string(), ".xls".to_string()],
            default_sheet: 0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            table_page_size: 50,
            chart_data_limit: 10,
            max_numeric_columns: 5,
            row_numbers: false,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            max_visible: 3,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            event_poll_interval_ms: 25,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "xlsx".to_string(),
            file_stem: "export".to_string(),
            directory: String::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            show_performance: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from all layers (default → user)
    pub fn load(app_name: &str) -> Result<Self> {
        match ConfigManager::new(app_name) {
            Ok(manager) => Self::load_with(&manager),
            Err(_) => Ok(AppConfig::default()),
        }
    }

    /// Load defaults merged with the user file managed by `manager`
    pub fn load_with(manager: &ConfigManager) -> Result<Self> {
        let mut config = AppConfig::default();
        config.merge(manager.load_file()?);
        config.validate()?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: AppConfig) {
        if other.version != CONFIG_VERSION {
            self.version = other.version;
        }

        self.upload.merge(other.upload);
        self.display.merge(other.display);
        self.notifications.merge(other.notifications);
        self.performance.merge(other.performance);
        self.export.merge(other.export);
        self.theme.merge(other.theme);
        self.debug.merge(other.debug);
    }

    pub fn validate(&self) -> Result<()> {
        if !self.version.starts_with(CONFIG_VERSION) {
            return Err(eyre!(
                "Unsupported config version: {}. Expected {}.x",
                self.version,
                CONFIG_VERSION
            ));
        }

        if self.upload.max_size_mb == 0 {
            return Err(eyre!("max_size_mb must be greater than 0"));
        }
        if self.upload.allowed_extensions.is_empty() {
            return Err(eyre!("allowed_extensions must list at least one extension"));
        }

        if self.display.table_page_size == 0 {
            return Err(eyre!("table_page_size must be greater than 0"));
        }
        if self.display.chart_data_limit == 0 {
            return Err(eyre!("chart_data_limit must be greater than 0"));
        }
        if self.display.chart_data_limit > MAX_CHART_DATA_LIMIT {
            return Err(eyre!(
                "chart_data_limit must be at most {}",
                MAX_CHART_DATA_LIMIT
            ));
        }

        if self.notifications.max_visible == 0 {
            return Err(eyre!("max_visible must be greater than 0"));
        }

        if self.performance.event_poll_interval_ms == 0 {
            return Err(eyre!("event_poll_interval_ms must be greater than 0"));
        }

        if ExportFormat::from_name(&self.export.default_format).is_none() {
            return Err(eyre!(
                "Invalid default_format: {}. Must be 'xlsx', 'csv', or 'json'",
                self.export.default_format
            ));
        }
        if self.export.file_stem.trim().is_empty() {
            return Err(eyre!("file_stem must not be empty"));
        }

        let parser = ColorParser::new();
        self.theme.colors.validate(&parser)?;

        Ok(())
    }

    /// The configured export format, falling back to xlsx.
    pub fn export_format(&self) -> ExportFormat {
        ExportFormat::from_name(&self.export.default_format).unwrap_or(ExportFormat::Xlsx)
    }
}

impl UploadConfig {
    pub fn merge(&mut self, other: Self) {
        let default = UploadConfig::default();
        if other.max_size_mb != default.max_size_mb {
            self.max_size_mb = other.max_size_mb;
        }
        if other.allowed_extensions != default.allowed_extensions {
            self.allowed_extensions = other.allowed_extensions;
        }
        if other.default_sheet != default.default_sheet {
            self.default_sheet = other.default_sheet;
        }
    }
}

impl DisplayConfig {
    pub fn merge(&mut self, other: Self) {
        let default = DisplayConfig::default();
        if other.table_page_size != default.table_page_size {
            self.table_page_size = other.table_page_size;
        }
        if other.chart_data_limit != default.chart_data_limit {
            self.chart_data_limit = other.chart_data_limit;
        }
        if other.max_numeric_columns != default.max_numeric_columns {
            self.max_numeric_columns = other.max_numeric_columns;
        }
        if other.row_numbers != default.row_numbers {
            self.row_numbers = other.row_numbers;
        }
    }
}

impl NotificationConfig {
    pub fn merge(&mut self, other: Self) {
        let default = NotificationConfig::default();
        if other.duration_ms != default.duration_ms {
            self.duration_ms = other.duration_ms;
        }
        if other.max_visible != default.max_visible {
            self.max_visible = other.max_visible;
        }
    }
}

impl PerformanceConfig {
    pub fn merge(&mut self, other: Self) {
        if other.event_poll_interval_ms != PerformanceConfig::default().event_poll_interval_ms {
            self.event_poll_interval_ms = other.event_poll_interval_ms;
        }
    }
}

impl ExportConfig {
    pub fn merge(&mut self, other: Self) {
        let default = ExportConfig::default();
        if other.default_format != default.default_format {
            self.default_format = other.default_format;
        }
        if other.file_stem != default.file_stem {
            self.file_stem = other.file_stem;
        }
        if other.directory != default.directory {
            self.directory = other.directory;
        }
    }
}

impl ThemeConfig {
    pub fn merge(&mut self, other: Self) {
        self.colors.merge(other.colors);
    }
}

impl DebugConfig {
    pub fn merge(&mut self, other: Self) {
        let default = DebugConfig::default();
        if other.enabled != default.enabled {
            self.enabled = other.enabled;
        }
        if other.show_performance != default.show_performance {
            self.show_performance = other.show_performance;
        }
    }
}

/// Declares `ColorConfig` with its defaults; merge, validation and theme
/// construction walk the same field list.
macro_rules! color_config {
    ($($field:ident => $default:expr),+ $(,)?) => {
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(default)]
        pub struct ColorConfig {
            $(pub $field: String,)+
        }

        impl Default for ColorConfig {
            fn default() -> Self {
                Self {
                    $($field: $default.to_string(),)+
                }
            }
        }

        impl ColorConfig {
            pub fn merge(&mut self, other: Self) {
                let default = ColorConfig::default();
                $(
                    if other.$field != default.$field {
                        self.$field = other.$field;
                    }
                )+
            }

            fn validate(&self, parser: &ColorParser) -> Result<()> {
                $(
                    parser.parse(&self.$field).map_err(|e| {
                        eyre!("Invalid color value for '{}': {}", stringify!($field), e)
                    })?;
                )+
                Ok(())
            }

            pub fn entries(&self) -> Vec<(&'static str, &str)> {
                vec![$((stringify!($field), self.$field.as_str()),)+]
            }
        }
    };
}

color_config! {
    primary => "#0854a0",
    secondary => "#e26800",
    success => "#107e3e",
    error => "#bb0000",
    warning => "#e9730c",
    info => "#0a6ed1",
    dimmed => "dark_gray",
    controls_bg => "indexed(236)",
    text_primary => "white",
    text_secondary => "dark_gray",
    text_inverse => "black",
    table_header => "white",
    table_border => "cyan",
    table_selected => "reversed",
    chart_bar => "#0854a0",
    chart_line => "#91007b",
    trend_up => "#107e3e",
    trend_down => "#bb0000",
    trend_neutral => "#e26800",
}

/// Color parser with terminal capability detection
pub struct ColorParser {
    supports_true_color: bool,
    supports_256: bool,
    no_color: bool,
}

impl ColorParser {
    pub fn new() -> Self {
        let no_color = std::env::var("NO_COLOR").is_ok();
        let support = supports_color::on(Stream::Stdout);

        Self {
            supports_true_color: support.as_ref().map(|s| s.has_16m).unwrap_or(false),
            supports_256: support.as_ref().map(|s| s.has_256).unwrap_or(false),
            no_color,
        }
    }

    /// Parse a color string (hex, `indexed(n)` or a name) into a terminal color
    pub fn parse(&self, s: &str) -> Result<Color> {
        if self.no_color {
            return Ok(Color::Reset);
        }

        let trimmed = s.trim();

        if trimmed.starts_with('#') && trimmed.len() == 7 {
            let (r, g, b) = parse_hex(trimmed)?;
            return Ok(self.convert_rgb_to_terminal_color(r, g, b));
        }

        let lower = trimmed.to_lowercase();
        if let Some(inner) = lower
            .strip_prefix("indexed(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let num = inner.trim().parse::<u8>().map_err(|_| {
                eyre!(
                    "Invalid indexed color: '{}'. Expected format: indexed(0-255)",
                    trimmed
                )
            })?;
            return Ok(Color::Indexed(num));
        }

        match lower.replace(' ', "_").as_str() {
            "black" => Ok(Color::Black),
            "red" => Ok(Color::Red),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "blue" => Ok(Color::Blue),
            "magenta" => Ok(Color::Magenta),
            "cyan" => Ok(Color::Cyan),
            "white" => Ok(Color::White),
            "bright_black" | "gray" | "grey" | "dark_gray" | "dark_grey" => Ok(Color::Indexed(8)),
            "bright_red" => Ok(Color::Indexed(9)),
            "bright_green" => Ok(Color::Indexed(10)),
            "bright_yellow" => Ok(Color::Indexed(11)),
            "bright_blue" => Ok(Color::Indexed(12)),
            "bright_magenta" => Ok(Color::Indexed(13)),
            "bright_cyan" => Ok(Color::Indexed(14)),
            "bright_white" => Ok(Color::Indexed(15)),
            "light_gray" | "light_grey" => Ok(Color::Indexed(7)),
            // Rendered as a modifier rather than a color
            "reset" | "reversed" => Ok(Color::Reset),
            _ => Err(eyre!(
                "Unknown color name: '{}'. Supported: basic ANSI colors (red, blue, etc.), \
                 bright variants (bright_red, etc.), indexed(n), or hex colors (#ff0000)",
                trimmed
            )),
        }
    }

    fn convert_rgb_to_terminal_color(&self, r: u8, g: u8, b: u8) -> Color {
        if self.supports_true_color {
            Color::Rgb(r, g, b)
        } else if self.supports_256 {
            Color::Indexed(rgb_to_256_color(r, g, b))
        } else {
            rgb_to_basic_ansi(r, g, b)
        }
    }
}

impl Default for ColorParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse `#rrggbb` into RGB components
pub fn parse_hex(s: &str) -> Result<(u8, u8, u8)> {
    let digits = s
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.is_ascii())
        .ok_or_else(|| eyre!("Invalid hex color format: '{}'. Expected format: #rrggbb", s))?;

    let component = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| eyre!("Invalid hex color component in: {}", s))
    };

    Ok((component(0..2)?, component(2..4)?, component(4..6)?))
}

/// Nearest index in the xterm 256-color palette
pub fn rgb_to_256_color(r: u8, g: u8, b: u8) -> u8 {
    let spread = r.max(g).max(b) as i16 - r.min(g).min(b) as i16;
    if spread < 10 {
        let gray = (r as u16 + g as u16 + b as u16) / 3;
        return match gray {
            0..=7 => 16,
            248.. => 231,
            _ => 232 + ((gray - 8) * 24 / 240) as u8,
        };
    }

    let cube = |v: u8| (v as u16 * 5 / 255) as u8;
    16 + 36 * cube(r) + 6 * cube(g) + cube(b)
}

/// Nearest of the 8 basic ANSI colors
pub fn rgb_to_basic_ansi(r: u8, g: u8, b: u8) -> Color {
    let spread = r.max(g).max(b) as i16 - r.min(g).min(b) as i16;
    if spread < 30 {
        let avg = (r as u16 + g as u16 + b as u16) / 3;
        return if avg < 64 { Color::Black } else { Color::White };
    }

    match (r > 128, g > 128, b > 128) {
        (false, false, false) => Color::Black,
        (true, false, false) => Color::Red,
        (false, true, false) => Color::Green,
        (true, true, false) => Color::Yellow,
        (false, false, true) => Color::Blue,
        (true, false, true) => Color::Magenta,
        (false, true, true) => Color::Cyan,
        (true, true, true) => Color::White,
    }
}

/// Theme containing parsed colors ready for use
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub colors: HashMap<String, Color>,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Result<Self> {
        let parser = ColorParser::new();
        let colors = config
            .colors
            .entries()
            .into_iter()
            .map(|(name, value)| Ok((name.to_string(), parser.parse(value)?)))
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { colors })
    }

    /// Color by name, `Reset` if not found
    pub fn get(&self, name: &str) -> Color {
        self.colors.get(name).copied().unwrap_or(Color::Reset)
    }

    pub fn get_optional(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }
}

const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../config/default.toml");
