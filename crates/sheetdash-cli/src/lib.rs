//! Shared CLI definitions for sheetdash.
//!
//! Used by the main application and by the build script (manpage) and
//! gen_docs binary (command-line-options markdown).

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Output format for exported views.
/// When `--export-format` is not given, the format is taken from the config file.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ExportFormatArg {
    /// Excel workbook (.xlsx)
    Xlsx,
    /// Comma-separated values
    Csv,
    /// JSON array of row objects
    Json,
}

impl ExportFormatArg {
    /// Detect export format from a path extension. Returns None when extension is missing or unknown.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "xlsx" => Some(Self::Xlsx),
                "csv" => Some(Self::Csv),
                "json" => Some(Self::Json),
                _ => None,
            })
    }
}

/// Command-line arguments for sheetdash
#[derive(Parser, Debug)]
#[command(version, about = "sheetdash")]
pub struct Args {
    /// Spreadsheet to open on startup (.xlsx or .xls)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Sheet to load, by 0-based index (default: first sheet)
    #[arg(long = "sheet", value_name = "N")]
    pub sheet: Option<usize>,

    /// Route to open after loading (e.g. dashboard, data, tiles, chart-types)
    #[arg(long = "route", value_name = "ROUTE")]
    pub route: Option<String>,

    /// Print dataset metrics as JSON and exit without starting the UI
    #[arg(long = "summary", requires = "path", action)]
    pub summary: bool,

    /// Format used when exporting the current view
    #[arg(long = "export-format", value_enum)]
    pub export_format: Option<ExportFormatArg>,

    /// Enable debug mode to show operational information
    #[arg(long = "debug", action)]
    pub debug: bool,

    /// Write logs to this file (default with --debug: cache directory)
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Display row numbers on the left side of the table
    #[arg(long = "row-numbers", action)]
    pub row_numbers: bool,

    /// Clear all cache data and exit
    #[arg(long = "clear-cache", action)]
    pub clear_cache: bool,

    /// Write the default configuration file and exit
    #[arg(long = "generate-config", action)]
    pub generate_config: bool,

    /// Overwrite an existing configuration file (with --generate-config)
    #[arg(long = "force", requires = "generate_config", action)]
    pub force: bool,
}

/// Render the command-line options as a markdown document.
pub fn render_options_markdown() -> String {
    let mut cmd = Args::command();
    cmd.build();

    let mut out = String::from("# Command Line Options\n\n");

    out.push_str("## Usage\n\n```\n");
    out.push_str(&cmd.render_usage().to_string());
    out.push_str("\n```\n\n");

    out.push_str("## Options\n\n");
    out.push_str("| Option | Description |\n");
    out.push_str("|--------|-------------|\n");

    for arg in cmd.get_arguments() {
        let id = arg.get_id().as_ref().to_string();
        if id == "help" || id == "version" {
            continue;
        }

        let placeholder: String = arg
            .get_value_names()
            .map(|names| {
                names
                    .iter()
                    .map(|n: &clap::builder::Str| format!("<{}>", n.as_ref() as &str))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        let option_str = if arg.is_positional() {
            format!("[{placeholder}]")
        } else {
            let mut parts = Vec::new();
            if let Some(s) = arg.get_short() {
                parts.push(format!("-{s}"));
            }
            if let Some(l) = arg.get_long() {
                parts.push(format!("--{l}"));
            }
            let op = parts.join(", ");
            if arg.get_action().takes_values() && !placeholder.is_empty() {
                format!("{op} {placeholder}")
            } else {
                op
            }
        };

        let help = arg
            .get_help()
            .map(|h| h.to_string())
            .unwrap_or_default()
            .replace('\n', " ");
        out.push_str(&format!("| `{option_str}` | {help} |\n"));
    }

    out
}
