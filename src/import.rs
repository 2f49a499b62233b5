//! Spreadsheet import: upload validation and decoding of one worksheet into
//! string rows.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, DataType, Reader, Sheets};
use chrono::{NaiveTime, Timelike};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::UploadConfig;
use crate::dataset::{Dataset, Row, SourceInfo};
use crate::store::TableStore;

const MB: u64 = 1024 * 1024;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid file type. Please upload {allowed} file(s).")]
    InvalidExtension { allowed: String },
    #[error("File size exceeds {limit_mb}MB limit.")]
    FileTooLarge { size: u64, limit_mb: u64 },
    #[error("Excel file contains no sheets.")]
    NoSheets,
    #[error("Sheet is empty. No data to process.")]
    EmptySheet,
    #[error("Sheet {index} not found. The workbook has {available} sheet(s).")]
    SheetNotFound { index: usize, available: usize },
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse Excel file: {0}")]
    Decode(#[from] calamine::Error),
}

/// Upload constraints and sheet selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Lower-case extensions including the dot, e.g. `.xlsx`
    pub allowed_extensions: Vec<String>,
    pub max_size_bytes: u64,
    /// 0-based index of the sheet to decode
    pub sheet: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![".xlsx".to_string(), ".xls".to_string()],
            max_size_bytes: 10 * MB,
            sheet: 0,
        }
    }
}

impl ImportOptions {
    pub fn from_config(config: &UploadConfig) -> Self {
        Self {
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|ext| normalize_extension(ext))
                .collect(),
            max_size_bytes: config.max_size_mb * MB,
            sheet: config.default_sheet,
        }
    }

    pub fn with_sheet(mut self, sheet: usize) -> Self {
        self.sheet = sheet;
        self
    }

    fn check_extension(&self, file_name: &str) -> Result<(), ImportError> {
        let lower = file_name.to_lowercase();
        let ok = lower
            .rfind('.')
            .map(|dot| &lower[dot..])
            .is_some_and(|ext| self.allowed_extensions.iter().any(|a| a == ext));
        if ok {
            Ok(())
        } else {
            Err(ImportError::InvalidExtension {
                allowed: self.allowed_extensions.join(" or "),
            })
        }
    }

    fn check_size(&self, size: u64) -> Result<(), ImportError> {
        if size > self.max_size_bytes {
            return Err(ImportError::FileTooLarge {
                size,
                limit_mb: self.max_size_bytes.div_ceil(MB),
            });
        }
        Ok(())
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Decoded content of one worksheet plus workbook metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWorkbook {
    pub rows: Vec<Row>,
    pub columns: Vec<String>,
    pub file_name: String,
    pub sheet_names: Vec<String>,
    pub sheet_name: String,
    pub sheet_index: usize,
    pub row_count: usize,
    pub column_count: usize,
}

impl ParsedWorkbook {
    pub fn into_dataset(self) -> Dataset {
        let source = SourceInfo::new(self.file_name).with_sheets(self.sheet_names, self.sheet_index);
        Dataset::with_columns(self.columns, self.rows, source)
    }
}

/// Validate and decode a spreadsheet file on disk.
pub fn import_path(path: &Path, options: &ImportOptions) -> Result<ParsedWorkbook, ImportError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    options.check_extension(&file_name)?;
    options.check_size(std::fs::metadata(path)?.len())?;

    let mut workbook = open_workbook_auto(path)?;
    decode_workbook(&mut workbook, file_name, options.sheet)
}

/// Validate and decode an in-memory spreadsheet.
pub fn import_bytes(
    file_name: &str,
    bytes: &[u8],
    options: &ImportOptions,
) -> Result<ParsedWorkbook, ImportError> {
    options.check_extension(file_name)?;
    options.check_size(bytes.len() as u64)?;

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    decode_workbook(&mut workbook, file_name.to_string(), options.sheet)
}

fn decode_workbook<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    file_name: String,
    sheet_index: usize,
) -> Result<ParsedWorkbook, ImportError> {
    let sheet_names = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(ImportError::NoSheets);
    }
    let sheet_name = sheet_names
        .get(sheet_index)
        .cloned()
        .ok_or(ImportError::SheetNotFound {
            index: sheet_index,
            available: sheet_names.len(),
        })?;

    let range = workbook
        .worksheet_range_at(sheet_index)
        .ok_or(ImportError::SheetNotFound {
            index: sheet_index,
            available: sheet_names.len(),
        })??;

    let mut lines = range.rows();
    let header = lines.next().ok_or(ImportError::EmptySheet)?;
    let columns = header_names(header);

    let rows: Vec<Row> = lines
        .map(|cells| cells.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|values| values.iter().any(|v| !v.is_empty()))
        .map(|values| {
            columns
                .iter()
                .cloned()
                .zip(values.into_iter().chain(std::iter::repeat(String::new())))
                .collect()
        })
        .collect();

    if rows.is_empty() {
        return Err(ImportError::EmptySheet);
    }

    Ok(ParsedWorkbook {
        row_count: rows.len(),
        column_count: columns.len(),
        rows,
        columns,
        file_name,
        sheet_names,
        sheet_name,
        sheet_index,
    })
}

/// Column names from the header row. Blank headers become `Column{n}`
/// (1-based) and repeated names get a `_2`, `_3`, ... suffix.
fn header_names(cells: &[Data]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let raw = cell_to_string(cell);
        let base = if raw.trim().is_empty() {
            format!("Column{}", i + 1)
        } else {
            raw
        };
        let mut name = base.clone();
        let mut k = 2;
        while names.contains(&name) {
            name = format!("{base}_{k}");
            k += 1;
        }
        names.push(name);
    }
    names
}

/// String form of a cell as shown to the user and parsed by metrics.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) if dt.time() == NaiveTime::MIN => dt.format("%Y-%m-%d").to_string(),
            Some(dt) if dt.nanosecond() == 0 => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            None => cell.to_string(),
        },
        Data::Error(e) => e.to_string(),
    }
}

/// What a successful load put into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub file_name: String,
    pub sheet_name: String,
    pub sheet_count: usize,
    pub row_count: usize,
    pub column_count: usize,
    pub numeric_columns: usize,
}

impl ImportSummary {
    pub fn message(&self) -> String {
        format!(
            "Loaded {} rows from {} ({})",
            self.row_count, self.file_name, self.sheet_name
        )
    }
}

/// Decode `path` and ingest it. On failure the store keeps its previous dataset.
pub fn load_into(
    store: &mut TableStore,
    path: &Path,
    options: &ImportOptions,
) -> Result<ImportSummary, ImportError> {
    let parsed = import_path(path, options).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "import rejected");
    })?;
    Ok(ingest_parsed(store, parsed))
}

/// Ingest an already decoded workbook.
pub fn ingest_parsed(store: &mut TableStore, parsed: ParsedWorkbook) -> ImportSummary {
    let file_name = parsed.file_name.clone();
    let sheet_name = parsed.sheet_name.clone();
    let sheet_count = parsed.sheet_names.len();

    store.ingest(parsed.into_dataset());

    let (row_count, column_count, numeric_columns) = store
        .metrics()
        .map(|m| (m.row_count, m.column_count, m.numeric_columns.len()))
        .unwrap_or_default();
    info!(file = %file_name, sheet = %sheet_name, rows = row_count, "workbook loaded");

    ImportSummary {
        file_name,
        sheet_name,
        sheet_count,
        row_count,
        column_count,
        numeric_columns,
    }
}
