//! Export of query results to xlsx, CSV or JSON.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use sheetdash_cli::ExportFormatArg;
use thiserror::Error;
use tracing::info;

use crate::dataset::Row;

const SHEET_NAME: &str = "Data";
const MAX_COLUMN_WIDTH: usize = 50;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No data to export")]
    NoData,
    #[error("Cannot write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Excel export failed: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("Export failed: {0}")]
    Polars(#[from] PolarsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Parse a format name as used in the config file.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "xlsx" | "excel" => Some(ExportFormat::Xlsx),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Xlsx => ExportFormat::Xlsx,
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Json => ExportFormat::Json,
        }
    }
}

/// `{stem}-{YYYY-MM-DD}.{ext}`
pub fn default_export_file_name(stem: &str, format: ExportFormat, date: NaiveDate) -> String {
    format!("{}-{}.{}", stem, date.format("%Y-%m-%d"), format.extension())
}

/// Write `rows` with the columns of the first row. Returns the number of rows written.
pub fn export_rows(rows: &[Row], path: &Path, format: ExportFormat) -> Result<usize, ExportError> {
    let first = rows.first().ok_or(ExportError::NoData)?;
    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    write_table(&columns, rows, path, format)
}

/// Write only `columns` (those present in the first row), in the given order.
pub fn export_columns(
    rows: &[Row],
    columns: &[String],
    path: &Path,
    format: ExportFormat,
) -> Result<usize, ExportError> {
    let first = rows.first().ok_or(ExportError::NoData)?;
    let columns: Vec<&str> = columns
        .iter()
        .map(String::as_str)
        .filter(|c| first.contains_key(*c))
        .collect();
    if columns.is_empty() {
        return Err(ExportError::NoData);
    }
    write_table(&columns, rows, path, format)
}

fn write_table(
    columns: &[&str],
    rows: &[Row],
    path: &Path,
    format: ExportFormat,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Xlsx => write_xlsx(columns, rows, path)?,
        ExportFormat::Csv => {
            let mut df = to_dataframe(columns, rows)?;
            let file = File::create(path)?;
            CsvWriter::new(file).include_header(true).finish(&mut df)?;
        }
        ExportFormat::Json => {
            let mut df = to_dataframe(columns, rows)?;
            let file = File::create(path)?;
            JsonWriter::new(file)
                .with_json_format(JsonFormat::Json)
                .finish(&mut df)?;
        }
    }
    info!(
        path = %path.display(),
        format = format.extension(),
        rows = rows.len(),
        columns = columns.len(),
        "export written"
    );
    Ok(rows.len())
}

fn cell<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

fn write_xlsx(columns: &[&str], rows: &[Row], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in columns.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *name, &header_format)?;

        let mut widest = name.chars().count();
        for (r, row) in rows.iter().enumerate() {
            let value = cell(row, name);
            widest = widest.max(value.chars().count());
            worksheet.write_string(r as u32 + 1, col, value)?;
        }
        let width = (widest + 2).min(MAX_COLUMN_WIDTH);
        worksheet.set_column_width(col, width as f64)?;
    }

    workbook.save(path)
}

fn to_dataframe(columns: &[&str], rows: &[Row]) -> PolarsResult<DataFrame> {
    let series: Vec<Column> = columns
        .iter()
        .map(|name| {
            let values: Vec<&str> = rows.iter().map(|row| cell(row, name)).collect();
            Series::new((*name).into(), values).into()
        })
        .collect();
    DataFrame::new(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::row_from_pairs;
    use tempfile::TempDir;

    fn sample() -> Vec<Row> {
        vec![
            row_from_pairs([("Region", "North"), ("Sales", "120")]),
            row_from_pairs([("Region", "South"), ("Sales", "80")]),
        ]
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            default_export_file_name("export", ExportFormat::Xlsx, date),
            "export-2024-03-09.xlsx"
        );
        assert_eq!(
            default_export_file_name("sales", ExportFormat::Csv, date),
            "sales-2024-03-09.csv"
        );
    }

    #[test]
    fn test_empty_rows_rejected() {
        let dir = TempDir::new().unwrap();
        let err = export_rows(&[], &dir.path().join("out.xlsx"), ExportFormat::Xlsx).unwrap_err();
        assert!(matches!(err, ExportError::NoData));
        assert!(!dir.path().join("out.xlsx").exists());
    }

    #[test]
    fn test_csv_export() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let written = export_rows(&sample(), &path, ExportFormat::Csv).unwrap();
        assert_eq!(written, 2);
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Region,Sales"));
        assert_eq!(lines.next(), Some("North,120"));
        assert_eq!(lines.next(), Some("South,80"));
    }

    #[test]
    fn test_json_export_is_array_of_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        export_rows(&sample(), &path, ExportFormat::Json).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["Region"], "North");
        assert_eq!(records[1]["Sales"], "80");
    }

    #[test]
    fn test_export_columns_subset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("subset.csv");
        let columns = vec!["Sales".to_string(), "Missing".to_string()];
        export_columns(&sample(), &columns, &path, ExportFormat::Csv).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().next(), Some("Sales"));
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::from_name("XLSX"), Some(ExportFormat::Xlsx));
        assert_eq!(ExportFormat::from_name("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_name("parquet"), None);
        assert_eq!(ExportFormat::from(ExportFormatArg::Csv), ExportFormat::Csv);
    }
}
