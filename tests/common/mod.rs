#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

/// A cell written to a test worksheet.
pub enum Value<'a> {
    Text(&'a str),
    Number(f64),
}

pub use Value::{Number, Text};

/// Write `sheets` (name, rows with the header first) to `dir/name`.
pub fn write_workbook(dir: &Path, name: &str, sheets: &[(&str, Vec<Vec<Value>>)]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    for (sheet_name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*sheet_name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                match value {
                    Value::Text(s) => {
                        worksheet.write_string(r as u32, c as u16, *s).unwrap();
                    }
                    Value::Number(n) => {
                        worksheet.write_number(r as u32, c as u16, *n).unwrap();
                    }
                }
            }
        }
    }
    workbook.save(&path).unwrap();
    path
}

/// Two sheets: `Q1` with four regions, `Q2` with two.
pub fn write_sales_workbook(dir: &Path) -> PathBuf {
    write_workbook(
        dir,
        "sales.xlsx",
        &[
            (
                "Q1",
                vec![
                    vec![Text("Region"), Text("Sales"), Text("Units")],
                    vec![Text("North"), Number(1200.0), Number(10.0)],
                    vec![Text("South"), Number(800.5), Number(7.0)],
                    vec![Text("East"), Number(1500.0), Number(12.0)],
                    vec![Text("West"), Number(300.0), Number(3.0)],
                ],
            ),
            (
                "Q2",
                vec![
                    vec![Text("Region"), Text("Sales")],
                    vec![Text("North"), Number(2000.0)],
                    vec![Text("South"), Number(100.0)],
                ],
            ),
        ],
    )
}

/// One sheet of text columns only.
pub fn write_people_workbook(dir: &Path) -> PathBuf {
    write_workbook(
        dir,
        "people.xlsx",
        &[(
            "People",
            vec![
                vec![Text("Name"), Text("City")],
                vec![Text("Ann"), Text("NYC")],
                vec![Text("Bo"), Text("Oslo")],
            ],
        )],
    )
}

/// A sheet holding only a header row.
pub fn write_header_only_workbook(dir: &Path) -> PathBuf {
    write_workbook(
        dir,
        "header_only.xlsx",
        &[("Empty", vec![vec![Text("Name"), Text("Qty")]])],
    )
}
