//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestDatasetBuilder` - Builder pattern for datasets
//! - `ScriptedParser` - a spreadsheet parser returning fixed records
//! - App and upload fixtures

use sheetlytics::AnalyticsApp;
use sheetlytics::config::AnalyticsConfig;
use sheetlytics::data::{SpreadsheetParser, UploadedFile};
use sheetlytics::storage::{KeyValueStore, MemoryStore};
use sheetlytics::types::{CellValue, Dataset, Record, Row};

// ============================================================================
// TestDatasetBuilder - Builder pattern for creating test datasets
// ============================================================================

/// Builder for datasets with named columns.
///
/// # Example
/// ```ignore
/// let ds = TestDatasetBuilder::new(&["x", "y"])
///     .row(vec!["A".into(), 10.0.into()])
///     .row(vec!["B".into(), 10.0.into()])
///     .build();
/// ```
pub struct TestDatasetBuilder {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl TestDatasetBuilder {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: Vec<CellValue>) -> Self {
        self.rows.push(Row::new(cells));
        self
    }

    /// Add `count` rows of `("Item i", i)`; requires two columns
    pub fn with_numbered_rows(mut self, count: usize) -> Self {
        for i in 0..count {
            self.rows.push(Row::new(vec![
                CellValue::text(format!("Item {}", i)),
                CellValue::Number(i as f64),
            ]));
        }
        self
    }

    pub fn build(self) -> Dataset {
        Dataset::new(self.columns, self.rows)
    }
}

// ============================================================================
// Parser and upload fixtures
// ============================================================================

/// Parser that ignores the bytes and returns fixed records
#[derive(Clone)]
pub struct ScriptedParser(pub Result<Vec<Record>, String>);

impl SpreadsheetParser for ScriptedParser {
    fn first_sheet_records(&self, _bytes: &[u8]) -> Result<Vec<Record>, String> {
        self.0.clone()
    }
}

/// Records of a dataset, in the shape a spreadsheet parser returns them
pub fn records_of(dataset: &Dataset) -> Vec<Record> {
    dataset
        .rows()
        .iter()
        .map(|row| {
            dataset
                .columns()
                .iter()
                .cloned()
                .zip(row.cells.iter().cloned())
                .filter(|(_, cell)| !cell.is_empty())
                .collect()
        })
        .collect()
}

/// The six-month business dataset used across tests
pub fn business_dataset() -> Dataset {
    sheetlytics::app::sample_dataset()
}

pub fn xlsx_upload(name: &str, size_bytes: u64) -> UploadedFile {
    let mut file = UploadedFile::new(name, vec![0x50, 0x4B, 0x03, 0x04]);
    file.size_bytes = size_bytes;
    file
}

/// App over `store` whose parser yields `dataset`
pub fn app_parsing<S: KeyValueStore>(store: S, dataset: &Dataset) -> AnalyticsApp<S> {
    AnalyticsApp::with_parser(
        store,
        AnalyticsConfig::default(),
        Box::new(ScriptedParser(Ok(records_of(dataset)))),
    )
}

/// In-memory app whose parser yields the business dataset
pub fn business_app() -> AnalyticsApp<MemoryStore> {
    app_parsing(MemoryStore::new(), &business_dataset())
}

// ============================================================================
// Assertion helpers
// ============================================================================

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "Expected {}, got {}",
        expected,
        actual
    );
}
