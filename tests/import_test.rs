use sheetdash::import::{import_path, load_into, ImportError, ImportOptions};
use sheetdash::TableStore;
use tempfile::TempDir;

mod common;

#[test]
fn test_import_first_sheet() {
    let dir = TempDir::new().unwrap();
    let path = common::write_sales_workbook(dir.path());

    let parsed = import_path(&path, &ImportOptions::default()).unwrap();
    assert_eq!(parsed.file_name, "sales.xlsx");
    assert_eq!(parsed.sheet_names, ["Q1", "Q2"]);
    assert_eq!(parsed.sheet_name, "Q1");
    assert_eq!(parsed.row_count, 4);
    assert_eq!(parsed.columns, ["Region", "Sales", "Units"]);
    assert_eq!(parsed.rows[0]["Sales"], "1200");
    assert_eq!(parsed.rows[1]["Sales"], "800.5");
}

#[test]
fn test_import_selected_sheet() {
    let dir = TempDir::new().unwrap();
    let path = common::write_sales_workbook(dir.path());

    let parsed = import_path(&path, &ImportOptions::default().with_sheet(1)).unwrap();
    assert_eq!(parsed.sheet_name, "Q2");
    assert_eq!(parsed.sheet_index, 1);
    assert_eq!(parsed.row_count, 2);
    assert_eq!(parsed.column_count, 2);
}

#[test]
fn test_sheet_out_of_range() {
    let dir = TempDir::new().unwrap();
    let path = common::write_sales_workbook(dir.path());

    let err = import_path(&path, &ImportOptions::default().with_sheet(5)).unwrap_err();
    assert!(matches!(
        err,
        ImportError::SheetNotFound {
            index: 5,
            available: 2
        }
    ));
}

#[test]
fn test_rejects_other_extensions_without_reading() {
    let dir = TempDir::new().unwrap();
    // The files do not exist: the extension check comes first
    for name in ["data.csv", "notes.txt"] {
        let err = import_path(&dir.path().join(name), &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, ImportError::InvalidExtension { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid file type. Please upload .xlsx or .xls file(s)."
        );
    }
}

#[test]
fn test_rejects_files_over_the_ceiling() {
    let dir = TempDir::new().unwrap();
    let path = common::write_sales_workbook(dir.path());
    let options = ImportOptions {
        max_size_bytes: 16,
        ..ImportOptions::default()
    };

    let err = import_path(&path, &options).unwrap_err();
    assert!(matches!(err, ImportError::FileTooLarge { .. }));
}

#[test]
fn test_header_only_sheet_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = common::write_header_only_workbook(dir.path());

    let err = import_path(&path, &ImportOptions::default()).unwrap_err();
    assert!(matches!(err, ImportError::EmptySheet));
}

#[test]
fn test_load_into_computes_metrics() {
    let dir = TempDir::new().unwrap();
    let path = common::write_sales_workbook(dir.path());
    let mut store = TableStore::new();

    let summary = load_into(&mut store, &path, &ImportOptions::default()).unwrap();
    assert_eq!(summary.row_count, 4);
    assert_eq!(summary.column_count, 3);
    assert_eq!(summary.numeric_columns, 2);
    assert_eq!(summary.sheet_count, 2);

    let metrics = store.metrics().unwrap();
    let sales = &metrics.numeric_columns["Sales"];
    assert_eq!(sales.sum, 3800.5);
    assert_eq!(sales.min, 300.0);
    assert_eq!(sales.max, 1500.0);
    assert!(!metrics.is_numeric("Region"));
}

#[test]
fn test_failed_import_keeps_previous_dataset() {
    let dir = TempDir::new().unwrap();
    let good = common::write_sales_workbook(dir.path());
    let empty = common::write_header_only_workbook(dir.path());
    let mut store = TableStore::new();

    load_into(&mut store, &good, &ImportOptions::default()).unwrap();
    store.set_filter("Region", "th");

    assert!(load_into(&mut store, &empty, &ImportOptions::default()).is_err());
    assert!(load_into(&mut store, &dir.path().join("missing.xlsx"), &ImportOptions::default()).is_err());

    let dataset = store.dataset().unwrap();
    assert_eq!(dataset.source().file_name, "sales.xlsx");
    assert_eq!(dataset.len(), 4);
    assert_eq!(store.query().len(), 2);
}
