use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::{debug, info, warn};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Clear, Gauge, Widget},
};

pub mod cache;
pub mod chart_data;
pub mod config;
pub mod dataset;
pub mod export;
pub mod import;
pub mod logging;
pub mod metrics;
pub mod navigation;
pub mod notify;
pub mod route;
pub mod store;
pub mod tiles;
pub mod views;
pub mod widgets;

pub use cache::CacheManager;
pub use config::{AppConfig, ColorParser, ConfigManager, Theme};
pub use export::{ExportError, ExportFormat};
pub use import::{ImportError, ImportOptions, ImportSummary};
pub use navigation::{NavigationGate, Resolution};
pub use notify::{Notification, NotificationCenter, NotificationKind, NotificationSink};
pub use route::Route;
pub use sheetdash_cli::Args;
pub use store::TableStore;

use chart_data::ChartKind;
use tiles::{metric_details, metric_tiles, SLIDE_COUNT, SLIDE_ROTATION};
use views::about::AboutView;
use views::charts::ChartsView;
use views::colors::ColorsView;
use views::components::ComponentsView;
use views::dashboard::DashboardView;
use views::detail::DetailView;
use views::home::HomeView;
use views::icons::IconsView;
use views::tiles::{TilesView, MAX_METRIC_TILES};
use views::upload::UploadView;
use views::RenderContext;
use widgets::controls::Controls;
use widgets::datatable::DataTableState;
use widgets::debug::DebugState;
use widgets::layout::{app_layout, centered_rect_fixed};
use widgets::nav::NavBar;
use widgets::text_input::{TextInput, TextInputEvent};
use widgets::toast::Toasts;

/// Application name used for config and cache directories
pub const APP_NAME: &str = "sheetdash";

pub const NO_DATA: &str = "No data available. Please upload an Excel file first.";

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Open(PathBuf, ImportOptions),
    DoLoad(PathBuf, ImportOptions), // Performs the blocking decode after the loading state has been drawn
    Navigate(String),
    Export(ExportFormat),
    ExportColumn(String, ExportFormat),
    Exit,
    Crash(String),
    Resize(u16, u16), // resized (width, height)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    /// Editing the filter of one column
    Filtering { column: String },
    OpenFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingState {
    Idle,
    Loading {
        file_path: PathBuf,
        file_size: u64,
        current_phase: String,
        progress_percent: u16, // 0-100
    },
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading { .. })
    }
}

pub struct App {
    store: TableStore,
    gate: NavigationGate,
    notifications: NotificationCenter,
    route: Route,
    config: AppConfig,
    theme: Theme,
    ctx: RenderContext,
    color_parser: ColorParser,
    /// Options of the most recent successful import, used when switching sheets
    import_options: ImportOptions,
    export_format: ExportFormat,
    path: Option<PathBuf>,
    /// Route path to show once the pending import finishes
    pending_route: Option<String>,
    pub table_state: DataTableState,
    chart_kind: ChartKind,
    slide_index: usize,
    last_slide: Instant,
    selected_metric: usize,
    pub input_mode: InputMode,
    input: TextInput,
    last_summary: Option<ImportSummary>,
    loading_state: LoadingState,
    debug: DebugState,
    events: Sender<AppEvent>,
}

impl App {
    pub fn send_event(&mut self, event: AppEvent) -> Result<()> {
        self.events.send(event)?;
        Ok(())
    }

    fn render_loading_gauge(loading_state: &LoadingState, area: Rect, buf: &mut Buffer) {
        if let LoadingState::Loading {
            file_path,
            current_phase,
            progress_percent,
            ..
        } = loading_state
        {
            let gauge_area = centered_rect_fixed(area, (area.width / 3).max(30), 5);
            let title = file_path
                .file_name()
                .map(|n| format!(" Loading {} ", n.to_string_lossy()))
                .unwrap_or_else(|| " Loading ".to_string());

            Clear.render(gauge_area, buf);
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).title(title))
                .percent(*progress_percent)
                .label(current_phase.clone())
                .render(gauge_area, buf);
        }
    }

    pub fn new(events: Sender<AppEvent>) -> App {
        let config = AppConfig::default();
        let theme = Theme::from_config(&config.theme).unwrap_or_default();
        Self::new_with_config(events, theme, config)
    }

    pub fn new_with_config(events: Sender<AppEvent>, theme: Theme, config: AppConfig) -> App {
        let ctx = RenderContext::from_theme_and_config(&theme, &config.display);
        let debug = DebugState {
            enabled: config.debug.enabled,
            show_performance: config.debug.show_performance,
            ..DebugState::default()
        };

        App {
            store: TableStore::new(),
            gate: NavigationGate::new(),
            notifications: NotificationCenter::from_config(&config.notifications),
            route: Route::default(),
            theme,
            ctx,
            color_parser: ColorParser::new(),
            import_options: ImportOptions::from_config(&config.upload),
            export_format: config.export_format(),
            path: None,
            pending_route: None,
            table_state: DataTableState::new(config.display.row_numbers),
            chart_kind: ChartKind::default(),
            slide_index: 0,
            last_slide: Instant::now(),
            selected_metric: 0,
            input_mode: InputMode::Normal,
            input: TextInput::default(),
            last_summary: None,
            loading_state: LoadingState::Idle,
            debug,
            events,
            config,
        }
    }

    pub fn enable_debug(&mut self) {
        self.debug.enabled = true;
    }

    pub fn enable_row_numbers(&mut self) {
        self.table_state.row_numbers = true;
    }

    pub fn set_export_format(&mut self, format: ExportFormat) {
        self.export_format = format;
    }

    /// Route to show after the next import completes, e.g. `data` or `/tiles`.
    pub fn set_pending_route(&mut self, path: impl Into<String>) {
        self.pending_route = Some(path.into());
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn loading_state(&self) -> &LoadingState {
        &self.loading_state
    }

    pub fn last_summary(&self) -> Option<&ImportSummary> {
        self.last_summary.as_ref()
    }

    pub fn chart_kind(&self) -> ChartKind {
        self.chart_kind
    }

    pub fn slide_index(&self) -> usize {
        self.slide_index
    }

    /// Options for opening a new file: configured limits and the default sheet.
    pub fn open_options(&self) -> ImportOptions {
        ImportOptions::from_config(&self.config.upload)
    }

    /// Show `route`, or wherever the navigation gate redirects it.
    pub fn navigate(&mut self, route: Route) -> Resolution {
        let resolution = self
            .gate
            .resolve(route, &self.store, &mut self.notifications);
        self.show(resolution)
    }

    pub fn navigate_path(&mut self, path: &str) -> Resolution {
        let resolution = self
            .gate
            .resolve_path(path, &self.store, &mut self.notifications);
        self.show(resolution)
    }

    fn show(&mut self, resolution: Resolution) -> Resolution {
        let target = resolution.target();
        if target != self.route {
            debug!(from = %self.route, to = %target, redirect = resolution.is_redirect(), "navigate");
            if target == Route::Tiles {
                self.last_slide = Instant::now();
            }
        }
        self.route = target;
        self.debug.route = target;
        resolution
    }

    /// Advance time-driven state. Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.notifications.expire(now);
        if self.route == Route::Tiles
            && now.saturating_duration_since(self.last_slide) >= SLIDE_ROTATION
        {
            self.slide_index = (self.slide_index + 1) % SLIDE_COUNT;
            self.last_slide = now;
            changed = true;
        }
        changed
    }

    fn num_columns(&self) -> usize {
        self.store.dataset().map(|d| d.columns().len()).unwrap_or(0)
    }

    fn selected_column_name(&self) -> Option<String> {
        self.store
            .dataset()?
            .columns()
            .get(self.table_state.selected_column)
            .cloned()
    }

    fn export_path(&self, format: ExportFormat) -> PathBuf {
        let date = chrono::Local::now().date_naive();
        let name = export::default_export_file_name(&self.config.export.file_stem, format, date);
        if self.config.export.directory.is_empty() {
            PathBuf::from(name)
        } else {
            Path::new(&self.config.export.directory).join(name)
        }
    }

    fn export(&mut self, columns: Option<&[String]>, format: ExportFormat) {
        let rows = self.store.query();
        let path = self.export_path(format);
        let result = match columns {
            Some(columns) => export::export_columns(&rows, columns, &path, format),
            None => export::export_rows(&rows, &path, format),
        };
        match result {
            Ok(count) => {
                info!(path = %path.display(), rows = count, "export finished");
                self.notifications.success(&format!(
                    "Data exported successfully! {} rows written to {}",
                    count,
                    path.display()
                ));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "export failed");
                self.notifications.error(&e.to_string());
            }
        }
    }

    fn switch_sheet(&mut self, forward: bool) -> Option<AppEvent> {
        let path = self.path.clone()?;
        let (index, count) = {
            let source = self.store.dataset()?.source();
            (source.sheet_index, source.sheet_names.len())
        };
        if count < 2 {
            self.notifications.info("This workbook has a single sheet");
            return None;
        }
        let next = if forward {
            (index + 1) % count
        } else {
            (index + count - 1) % count
        };
        self.pending_route = Some(self.route.path());
        Some(AppEvent::Open(path, self.import_options.clone().with_sheet(next)))
    }

    fn start_input(&mut self, mode: InputMode) {
        let (title, value) = match &mode {
            InputMode::Filtering { column } => (
                format!("Filter {column}"),
                self.store.filters().get(column).cloned().unwrap_or_default(),
            ),
            InputMode::OpenFile => (
                "Open file".to_string(),
                self.path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            InputMode::Normal => return,
        };
        self.input = TextInput::new(title)
            .with_value(value)
            .with_border_color(self.ctx.primary);
        self.input_mode = mode;
    }

    fn input_key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        match self.input.handle_key(event) {
            TextInputEvent::None => None,
            TextInputEvent::Cancel => {
                self.input_mode = InputMode::Normal;
                self.input.clear();
                None
            }
            TextInputEvent::Submit => {
                let value = self.input.value.trim().to_string();
                let mode = std::mem::take(&mut self.input_mode);
                self.input.clear();
                match mode {
                    InputMode::Filtering { column } => {
                        self.store.set_filter(&column, &value);
                        self.table_state.selected_row = 0;
                        self.table_state.start_row = 0;
                        self.debug.last_action = "set_filter".to_string();
                        None
                    }
                    InputMode::OpenFile => {
                        let value = value.trim_matches(|c| c == '"' || c == '\'');
                        if value.is_empty() {
                            return None;
                        }
                        Some(AppEvent::Open(PathBuf::from(value), self.open_options()))
                    }
                    InputMode::Normal => None,
                }
            }
        }
    }

    fn key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        self.debug.on_key(event);

        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Some(AppEvent::Exit);
        }
        if self.loading_state.is_loading() {
            return None;
        }
        if self.input_mode != InputMode::Normal {
            return self.input_key(event);
        }

        match event.code {
            KeyCode::Char('q') => return Some(AppEvent::Exit),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(route) = Route::from_digit(c) {
                    self.navigate(route);
                }
                return None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                let current = widgets::nav::nav_index(self.route).unwrap_or(0);
                let len = Route::NAV.len();
                let next = if event.code == KeyCode::Tab {
                    (current + 1) % len
                } else {
                    (current + len - 1) % len
                };
                self.navigate(Route::NAV[next]);
                return None;
            }
            KeyCode::Char('o') => {
                self.start_input(InputMode::OpenFile);
                return None;
            }
            KeyCode::Esc if !matches!(self.route, Route::DataDetail(_)) => {
                self.notifications.dismiss_all();
                return None;
            }
            KeyCode::Char('[') => return self.switch_sheet(false),
            KeyCode::Char(']') => return self.switch_sheet(true),
            _ => {}
        }

        match self.route {
            Route::Data => self.data_key(event),
            Route::DataDetail(index) => {
                match event.code {
                    KeyCode::Left | KeyCode::Char('h') if index > 0 => {
                        self.navigate(Route::DataDetail(index - 1));
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        let len = self.store.dataset().map(|d| d.len()).unwrap_or(0);
                        if index + 1 < len {
                            self.navigate(Route::DataDetail(index + 1));
                        }
                    }
                    KeyCode::Esc | KeyCode::Backspace => {
                        self.navigate(Route::Data);
                    }
                    _ => {}
                }
                None
            }
            Route::ChartTypes => {
                if event.code == KeyCode::Char('t') {
                    self.chart_kind = self.chart_kind.next();
                    self.debug.last_action = format!("chart_kind={:?}", self.chart_kind);
                }
                None
            }
            Route::Tiles => self.tiles_key(event),
            Route::Dashboard => match event.code {
                KeyCode::Char('e') => Some(AppEvent::Export(self.export_format)),
                _ => None,
            },
            Route::Home
            | Route::Upload
            | Route::Components
            | Route::Icons
            | Route::Colors
            | Route::About => None,
        }
    }

    fn data_key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        let num_rows = self.store.query_indices().len();
        let num_columns = self.num_columns();
        let page = self.config.display.table_page_size;

        match event.code {
            KeyCode::Down | KeyCode::Char('j') => self.table_state.select_next(num_rows),
            KeyCode::Up | KeyCode::Char('k') => self.table_state.select_previous(),
            KeyCode::PageDown => self.table_state.page_down(num_rows, page),
            KeyCode::PageUp => self.table_state.page_up(page),
            KeyCode::Home | KeyCode::Char('g') => self.table_state.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.table_state.select_last(num_rows),
            KeyCode::Right | KeyCode::Char('l') => self.table_state.next_column(num_columns),
            KeyCode::Left | KeyCode::Char('h') => self.table_state.previous_column(),
            KeyCode::Enter => {
                let indices = self.store.query_indices();
                if let Some(index) = indices.get(self.table_state.selected_row) {
                    self.navigate(Route::DataDetail(*index));
                }
            }
            KeyCode::Char('/') => {
                if let Some(column) = self.selected_column_name() {
                    self.start_input(InputMode::Filtering { column });
                }
            }
            KeyCode::Char('s') => {
                if let Some(column) = self.selected_column_name() {
                    self.store.toggle_sort(&column);
                    self.table_state.selected_row = 0;
                    self.table_state.start_row = 0;
                    self.debug.last_action = format!("toggle_sort({column})");
                }
            }
            KeyCode::Char('S') => {
                self.store.clear_sort();
                self.debug.last_action = "clear_sort".to_string();
            }
            KeyCode::Char('c') => {
                self.store.clear_filters();
                self.table_state.selected_row = 0;
                self.table_state.start_row = 0;
                self.debug.last_action = "clear_filters".to_string();
            }
            KeyCode::Char('e') => return Some(AppEvent::Export(self.export_format)),
            KeyCode::Char('E') => {
                return self
                    .selected_column_name()
                    .map(|column| AppEvent::ExportColumn(column, self.export_format));
            }
            _ => {}
        }
        None
    }

    fn tiles_key(&mut self, event: &KeyEvent) -> Option<AppEvent> {
        let metrics = self.store.metrics()?;
        let tiles = metric_tiles(metrics, MAX_METRIC_TILES);

        match event.code {
            KeyCode::Right | KeyCode::Char('l') => {
                self.slide_index = (self.slide_index + 1) % SLIDE_COUNT;
                self.last_slide = Instant::now();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.slide_index = (self.slide_index + SLIDE_COUNT - 1) % SLIDE_COUNT;
                self.last_slide = Instant::now();
            }
            KeyCode::Down | KeyCode::Char('j') if !tiles.is_empty() => {
                self.selected_metric = (self.selected_metric + 1) % tiles.len();
            }
            KeyCode::Up | KeyCode::Char('k') if !tiles.is_empty() => {
                self.selected_metric = (self.selected_metric + tiles.len() - 1) % tiles.len();
            }
            KeyCode::Enter => {
                if let Some(details) = tiles
                    .get(self.selected_metric)
                    .and_then(|tile| metric_details(&tile.column, metrics))
                {
                    self.notifications.info(&details);
                }
            }
            _ => {}
        }
        None
    }

    pub fn event(&mut self, event: &AppEvent) -> Option<AppEvent> {
        self.debug.num_events += 1;
        match event {
            AppEvent::Key(key) => self.key(key),
            AppEvent::Open(..) if self.loading_state.is_loading() => None,
            AppEvent::Open(path, options) => {
                // Set loading state first, then trigger a render before actually loading
                let file_size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
                self.loading_state = LoadingState::Loading {
                    file_path: path.clone(),
                    file_size,
                    current_phase: "Reading workbook".to_string(),
                    progress_percent: 10,
                };
                Some(AppEvent::DoLoad(path.clone(), options.clone()))
            }
            AppEvent::DoLoad(path, options) => {
                let result = import::load_into(&mut self.store, path, options);
                self.loading_state = LoadingState::Idle;
                match result {
                    Ok(summary) => {
                        self.notifications.success(&summary.message());
                        self.path = Some(path.clone());
                        self.import_options = options.clone();
                        self.table_state.reset();
                        self.selected_metric = 0;
                        self.slide_index = 0;
                        self.last_summary = Some(summary);
                        match self.pending_route.take() {
                            Some(route) => self.navigate_path(&route),
                            None => self.navigate(Route::Dashboard),
                        };
                    }
                    Err(e) => {
                        self.pending_route = None;
                        self.notifications.error(&e.to_string());
                    }
                }
                None
            }
            AppEvent::Navigate(path) => {
                self.navigate_path(path);
                None
            }
            AppEvent::Export(format) => {
                self.export(None, *format);
                None
            }
            AppEvent::ExportColumn(column, format) => {
                self.export(Some(std::slice::from_ref(column)), *format);
                None
            }
            AppEvent::Resize(_cols, _rows) => None,
            AppEvent::Exit | AppEvent::Crash(_) => None,
        }
    }

    /// Draw the current route into `area`. Returns the row count for the controls bar.
    fn render_route(&mut self, area: Rect, buf: &mut Buffer) -> Option<usize> {
        let ctx = &self.ctx;
        let dataset = self.store.dataset();
        let metrics = self.store.metrics();

        match self.route {
            Route::Home => HomeView {
                loaded: dataset.map(|d| d.source().file_name.as_str()),
                ctx,
            }
            .render(area, buf),
            Route::Upload => UploadView {
                options: &self.import_options,
                source: dataset.map(|d| d.source()),
                summary: self.last_summary.as_ref(),
                ctx,
            }
            .render(area, buf),
            Route::Dashboard => match (dataset, metrics) {
                (Some(dataset), Some(metrics)) => DashboardView {
                    metrics,
                    source: dataset.source(),
                    ctx,
                }
                .render(area, buf),
                _ => views::render_message(NO_DATA, ctx.text_secondary, area, buf),
            },
            Route::ChartTypes => match metrics {
                Some(metrics) => {
                    let rows = self.store.query();
                    ChartsView {
                        rows: &rows,
                        metrics,
                        kind: self.chart_kind,
                        ctx,
                    }
                    .render(area, buf);
                    return Some(rows.len());
                }
                None => views::render_message(NO_DATA, ctx.text_secondary, area, buf),
            },
            Route::Tiles => match (dataset, metrics) {
                (Some(dataset), Some(metrics)) => TilesView {
                    metrics,
                    source: dataset.source(),
                    slide_index: self.slide_index,
                    selected_metric: self.selected_metric,
                    ctx,
                }
                .render(area, buf),
                _ => views::render_message(NO_DATA, ctx.text_secondary, area, buf),
            },
            Route::Components => ComponentsView { ctx }.render(area, buf),
            Route::Icons => IconsView { ctx }.render(area, buf),
            Route::Colors => ColorsView {
                parser: &self.color_parser,
                theme_config: &self.config.theme.colors,
                theme: &self.theme,
                ctx,
            }
            .render(area, buf),
            Route::Data => {
                let rows = self.store.query();
                let num_columns = dataset.map(|d| d.columns().len()).unwrap_or(0);
                self.table_state.clamp(rows.len(), num_columns);
                views::data::render(&self.store, &rows, &mut self.table_state, ctx, area, buf);
                return Some(rows.len());
            }
            Route::DataDetail(index) => match (dataset, self.store.row(index)) {
                (Some(dataset), Some(row)) => DetailView {
                    index,
                    total: dataset.len(),
                    row,
                    ctx,
                }
                .render(area, buf),
                _ => views::render_message(NO_DATA, ctx.text_secondary, area, buf),
            },
            Route::About => AboutView { ctx }.render(area, buf),
        }
        None
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.debug.num_frames += 1;

        let input_visible = self.input_mode != InputMode::Normal;
        let layout = app_layout(area, input_visible, self.debug.enabled);

        (&NavBar {
            current: self.route,
            has_data: self.store.has_data(),
            active_color: self.ctx.primary,
            dimmed_color: self.ctx.dimmed,
        })
            .render(layout.nav_bar, buf);

        let row_count = self.render_route(layout.main_view, buf);
        if self.loading_state.is_loading() {
            App::render_loading_gauge(&self.loading_state, layout.main_view, buf);
        }

        if let Some(input_area) = layout.input {
            (&self.input).render(input_area, buf);
        }

        (&Controls::for_route(self.route)
            .with_row_count(row_count)
            .with_dimmed(input_visible)
            .with_colors(self.ctx.controls_bg, self.ctx.primary))
            .render(layout.control_bar, buf);

        if let Some(debug_area) = layout.debug {
            (&self.debug).render(debug_area, buf);
        }

        Toasts::new(self.notifications.visible(), &self.theme).render(layout.main_view, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{row_from_pairs, Dataset, SourceInfo};
    use std::sync::mpsc::channel;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app_with_rows() -> App {
        let (tx, _rx) = channel();
        let mut app = App::new(tx);
        app.store.ingest(Dataset::new(
            vec![
                row_from_pairs([("Name", "Ann"), ("Qty", "3")]),
                row_from_pairs([("Name", "Bo"), ("Qty", "4")]),
                row_from_pairs([("Name", "Cy"), ("Qty", "1")]),
            ],
            SourceInfo::new("people.xlsx"),
        ));
        app
    }

    #[test]
    fn test_digit_navigation_is_gated() {
        let (tx, _rx) = channel();
        let mut app = App::new(tx);
        app.event(&key(KeyCode::Char('3')));
        assert_eq!(app.route(), Route::Upload);
        assert_eq!(app.notifications().len(), 1);

        app.event(&key(KeyCode::Char('0')));
        assert_eq!(app.route(), Route::About);
        assert_eq!(app.notifications().len(), 1);
    }

    #[test]
    fn test_enter_opens_detail_of_sorted_row() {
        let mut app = app_with_rows();
        app.navigate(Route::Data);
        app.table_state.selected_column = 1;
        app.event(&key(KeyCode::Char('s')));
        app.event(&key(KeyCode::Enter));
        assert_eq!(app.route(), Route::DataDetail(2));

        app.event(&key(KeyCode::Esc));
        assert_eq!(app.route(), Route::Data);
    }

    #[test]
    fn test_filter_input_applies_on_enter() {
        let mut app = app_with_rows();
        app.navigate(Route::Data);
        app.event(&key(KeyCode::Char('/')));
        assert_eq!(
            app.input_mode,
            InputMode::Filtering {
                column: "Name".to_string()
            }
        );
        app.event(&key(KeyCode::Char('b')));
        assert_eq!(app.store().query().len(), 3);
        app.event(&key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.store().query().len(), 1);

        app.event(&key(KeyCode::Char('c')));
        assert_eq!(app.store().query().len(), 3);
    }

    #[test]
    fn test_open_is_two_phase_and_ignored_while_loading() {
        let (tx, _rx) = channel();
        let mut app = App::new(tx);
        let path = PathBuf::from("missing.xlsx");
        let next = app.event(&AppEvent::Open(path.clone(), ImportOptions::default()));
        assert!(matches!(next, Some(AppEvent::DoLoad(..))));
        assert!(app.loading_state().is_loading());
        assert!(app
            .event(&AppEvent::Open(path, ImportOptions::default()))
            .is_none());
    }

    #[test]
    fn test_tick_rotates_slides_on_tiles_only() {
        let mut app = app_with_rows();
        let later = Instant::now() + SLIDE_ROTATION * 2;
        assert!(!app.tick(later));
        assert_eq!(app.slide_index(), 0);

        app.navigate(Route::Tiles);
        assert!(app.tick(later));
        assert_eq!(app.slide_index(), 1);
    }

    #[test]
    fn test_chart_kind_cycles() {
        let mut app = app_with_rows();
        app.navigate(Route::ChartTypes);
        app.event(&key(KeyCode::Char('t')));
        assert_eq!(app.chart_kind(), ChartKind::Line);
    }

    #[test]
    fn test_render_every_route() {
        let mut app = app_with_rows();
        let area = Rect::new(0, 0, 120, 40);
        for route in Route::NAV.into_iter().chain([Route::DataDetail(1)]) {
            app.navigate(route);
            let mut buf = Buffer::empty(area);
            (&mut app).render(area, &mut buf);
        }
        assert_eq!(app.route(), Route::DataDetail(1));
    }
}
