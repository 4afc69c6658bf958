//! Workbook Ingestion Integration Tests
//!
//! Real `.xlsx` bytes go through the calamine parser and the ingestion
//! adapter.

use rust_xlsxwriter::Workbook;
use sheetlytics::data::{CalamineParser, DataError, SpreadsheetParser, UploadedFile, ingest};
use sheetlytics::types::CellValue;

/// Two sheets; the first has a blank header, a repeated header and a blank
/// row between its two data rows.
fn sales_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Month").unwrap();
    sheet.write_string(0, 1, "Sales").unwrap();
    sheet.write_string(0, 3, "Sales").unwrap();
    sheet.write_string(1, 0, "January").unwrap();
    sheet.write_number(1, 1, 25000.0).unwrap();
    sheet.write_string(1, 2, "north").unwrap();
    sheet.write_number(1, 3, 1.0).unwrap();
    sheet.write_string(3, 0, "February").unwrap();
    sheet.write_number(3, 1, 32000.0).unwrap();
    sheet.write_number(3, 3, 2.0).unwrap();

    let other = workbook.add_worksheet();
    other.write_string(0, 0, "Ignored").unwrap();
    other.write_number(1, 0, 99.0).unwrap();

    workbook.save_to_buffer().unwrap()
}

#[test]
fn test_first_sheet_records() {
    let records = CalamineParser.first_sheet_records(&sales_workbook()).unwrap();
    assert_eq!(records.len(), 2);

    let keys: Vec<&str> = records[0].iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["Month", "Sales", "__EMPTY", "Sales_1"]);

    // Empty cells are left out of the record
    let keys: Vec<&str> = records[1].iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["Month", "Sales", "Sales_1"]);
    assert_eq!(records[1][1].1, CellValue::Number(32000.0));
}

#[test]
fn test_ingest_real_workbook() {
    let upload = UploadedFile::new("sales.xlsx", sales_workbook());
    let dataset = ingest(&upload, &CalamineParser).unwrap();

    assert_eq!(dataset.columns(), ["Month", "Sales", "__EMPTY", "Sales_1"]);
    assert_eq!(dataset.row_count(), 2);
    assert_eq!(dataset.rows()[0].cells[2], CellValue::text("north"));
    assert_eq!(dataset.rows()[1].cells[0], CellValue::text("February"));
    assert_eq!(dataset.rows()[1].cells[2], CellValue::Empty);
    assert!(
        dataset
            .rows()
            .iter()
            .all(|row| !row.cells.contains(&CellValue::Number(99.0)))
    );
}

#[test]
fn test_header_only_workbook_is_rejected() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Month").unwrap();
    sheet.write_string(0, 1, "Sales").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let upload = UploadedFile::new("headers.xlsx", bytes);
    assert!(matches!(
        ingest(&upload, &CalamineParser),
        Err(DataError::ParseFailure(_))
    ));
}
