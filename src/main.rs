use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use sheetdash::logging::{init_logging, LogConfig, LogDestination};
use sheetdash::{App, AppConfig, AppEvent, Args, ExportFormat, ImportOptions, Theme, APP_NAME};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

fn import_options(args: &Args, config: &AppConfig) -> ImportOptions {
    let opts = ImportOptions::from_config(&config.upload);
    match args.sheet {
        Some(sheet) => opts.with_sheet(sheet),
        None => opts,
    }
}

fn log_config(args: &Args) -> LogConfig {
    let destination = if let Some(path) = &args.log_file {
        LogDestination::File(path.clone())
    } else if args.summary {
        LogDestination::Stderr
    } else if args.debug {
        sheetdash::CacheManager::new(APP_NAME)
            .and_then(|cache| cache.log_file())
            .map(LogDestination::File)
            .unwrap_or(LogDestination::Discard)
    } else {
        LogDestination::Discard
    };
    LogConfig::from_verbosity(args.verbose).with_destination(destination)
}

fn render(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    terminal.draw(|frame| frame.render_widget(app, frame.area()))?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, args: &Args, config: AppConfig, theme: Theme) -> Result<()> {
    let (tx, rx) = channel::<AppEvent>();
    let poll_interval = Duration::from_millis(config.performance.event_poll_interval_ms);
    let opts = import_options(args, &config);
    let mut app = App::new_with_config(tx.clone(), theme, config);
    if args.debug {
        app.enable_debug();
    }
    if args.row_numbers {
        app.enable_row_numbers();
    }
    if let Some(format) = args.export_format {
        app.set_export_format(ExportFormat::from(format));
    }
    render(&mut terminal, &mut app)?;

    match (&args.path, &args.route) {
        (Some(path), route) => {
            if let Some(route) = route {
                app.set_pending_route(route.clone());
            }
            tx.send(AppEvent::Open(path.clone(), opts))?;
        }
        (None, Some(route)) => tx.send(AppEvent::Navigate(route.clone()))?,
        (None, None) => {}
    }

    loop {
        if crossterm::event::poll(poll_interval)? {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => tx.send(AppEvent::Key(key))?,
                crossterm::event::Event::Resize(cols, rows) => {
                    tx.send(AppEvent::Resize(cols, rows))?
                }
                _ => {}
            }
        }

        let mut updated = match rx.recv_timeout(Duration::from_millis(0)) {
            Ok(event) => {
                match event {
                    AppEvent::Exit => break,
                    AppEvent::Crash(msg) => {
                        return Err(color_eyre::eyre::eyre!(msg));
                    }
                    event => {
                        if let Some(event) = app.event(&event) {
                            tx.send(event)?;
                        }
                    }
                }
                true
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => false,
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        };
        updated |= app.tick(Instant::now());

        if updated {
            render(&mut terminal, &mut app)?;
        }
    }
    Ok(())
}

/// Import the file and print its metrics as JSON, without starting the UI.
fn print_summary(args: &Args, config: &AppConfig) -> Result<()> {
    let Some(path) = &args.path else {
        return Err(color_eyre::eyre::eyre!("--summary requires a file path"));
    };
    let mut store = sheetdash::TableStore::new();
    sheetdash::import::load_into(&mut store, path, &import_options(args, config))?;
    let metrics = store.metrics().cloned().unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

fn handle_early_exit_flags(args: &Args) -> Result<Option<()>> {
    if args.clear_cache {
        match sheetdash::CacheManager::new(APP_NAME) {
            Ok(cache) => {
                if let Err(e) = cache.clear_all() {
                    eprintln!("Error clearing cache: {}", e);
                    std::process::exit(1);
                }
                println!("Cache cleared successfully");
                return Ok(Some(()));
            }
            Err(_e) => {
                println!("No cache to clear");
                return Ok(Some(()));
            }
        }
    }

    if args.generate_config {
        match sheetdash::ConfigManager::new(APP_NAME) {
            Ok(config) => match config.write_default_config(args.force) {
                Ok(path) => {
                    println!("Configuration written to {}", path.display());
                    return Ok(Some(()));
                }
                Err(e) => {
                    eprintln!("Error writing configuration: {}", e);
                    std::process::exit(1);
                }
            },
            Err(e) => {
                eprintln!("Error initializing config manager: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(None)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(()) = handle_early_exit_flags(&args)? {
        return Ok(());
    }

    color_eyre::install()?;
    init_logging(&log_config(&args))?;
    let config = AppConfig::load(APP_NAME)?;

    if args.summary {
        return print_summary(&args, &config);
    }

    let theme = Theme::from_config(&config.theme)?;
    let terminal = ratatui::init();
    let result = run(terminal, &args, config, theme);
    ratatui::restore();
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_import_options_from_args() {
        let args = Args::parse_from(["sheetdash", "book.xlsx", "--sheet", "2"]);
        let opts = import_options(&args, &AppConfig::default());
        assert_eq!(opts.sheet, 2);
        assert_eq!(opts.max_size_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_log_destination_follows_flags() {
        let args = Args::parse_from(["sheetdash", "book.xlsx", "--log-file", "out.log", "-v"]);
        let config = log_config(&args);
        assert_eq!(config.destination, LogDestination::File(PathBuf::from("out.log")));
        assert_eq!(config.level, tracing::Level::DEBUG);

        let args = Args::parse_from(["sheetdash", "book.xlsx"]);
        assert_eq!(log_config(&args).destination, LogDestination::Discard);

        let args = Args::parse_from(["sheetdash", "book.xlsx", "--summary"]);
        assert_eq!(log_config(&args).destination, LogDestination::Stderr);
    }
}
