//! Spreadsheet ingestion
//!
//! Validates an uploaded file and converts its bytes into a [`Dataset`]
//! through a [`SpreadsheetParser`]. Only the first worksheet is read.
//!
//! ## Limits
//!
//! - Files must carry a `.xls`/`.xlsx` extension or a spreadsheet MIME type
//! - Files larger than [`MAX_UPLOAD_BYTES`] return [`DataError::TooLarge`]
//! - A sheet with no data rows returns [`DataError::ParseFailure`]

use crate::constants::{ACCEPTED_EXTENSIONS, ACCEPTED_MIME_TYPES, EMPTY_HEADER, MAX_UPLOAD_BYTES};
use crate::data::error::{DataError, DataResult};
use crate::perf::ScopedTimer;
use crate::types::{CellValue, Dataset, Record};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::collections::HashMap;
use std::io::Cursor;
use tracing::debug;

/// A file handed over by the file input once its bytes have been read
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub name: String,
    pub size_bytes: u64,
    /// MIME type declared by the browser/OS, if any
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            mime_type: None,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read a file from disk, keeping its file name
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self::new(name, bytes))
    }
}

/// The external spreadsheet-parsing collaborator.
///
/// Returns one record per data row of the first sheet, keys in header order.
pub trait SpreadsheetParser {
    fn first_sheet_records(&self, bytes: &[u8]) -> Result<Vec<Record>, String>;
}

/// [`SpreadsheetParser`] backed by calamine (`.xls` and `.xlsx`)
#[derive(Clone, Copy, Debug, Default)]
pub struct CalamineParser;

impl SpreadsheetParser for CalamineParser {
    fn first_sheet_records(&self, bytes: &[u8]) -> Result<Vec<Record>, String> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| e.to_string())?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| "Workbook has no sheets".to_string())?
            .map_err(|e| e.to_string())?;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(Vec::new());
        };
        let headers = header_names(header_row);

        let records = rows
            .filter_map(|cells| {
                let record: Record = headers
                    .iter()
                    .zip(cells)
                    .filter_map(|(name, cell)| {
                        let value = cell_value(cell);
                        (!value.is_empty()).then(|| (name.clone(), value))
                    })
                    .collect();
                (!record.is_empty()).then_some(record)
            })
            .collect();

        Ok(records)
    }
}

/// Check a file's extension or declared MIME type against the accepted set
pub fn is_spreadsheet_file(name: &str, mime_type: Option<&str>) -> bool {
    let lower = name.to_lowercase();
    let has_extension = ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext));
    let has_mime = mime_type.is_some_and(|mime| ACCEPTED_MIME_TYPES.contains(&mime));
    has_extension || has_mime
}

/// Validate the file's format and size without parsing it
pub fn validate_upload(file: &UploadedFile) -> DataResult<()> {
    if !is_spreadsheet_file(&file.name, file.mime_type.as_deref()) {
        return Err(DataError::InvalidFormat {
            name: file.name.clone(),
        });
    }

    if file.size_bytes > MAX_UPLOAD_BYTES {
        return Err(DataError::TooLarge {
            size_mb: file.size_bytes as f64 / (1024.0 * 1024.0),
            max_mb: MAX_UPLOAD_BYTES / (1024 * 1024),
        });
    }

    Ok(())
}

/// Ingest an uploaded spreadsheet into a dataset.
///
/// Pure: no persistence or notification happens here. The dataset is either
/// fully accepted or the whole upload is rejected.
pub fn ingest(file: &UploadedFile, parser: &dyn SpreadsheetParser) -> DataResult<Dataset> {
    let _timer = ScopedTimer::with_default_threshold("ingest");

    validate_upload(file)?;

    let records = parser
        .first_sheet_records(&file.bytes)
        .map_err(DataError::ParseFailure)?;
    if records.is_empty() {
        return Err(DataError::ParseFailure(
            "the first sheet contains no data rows".to_string(),
        ));
    }

    let dataset = Dataset::from_records(records);
    debug!(
        file = %file.name,
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "Ingested spreadsheet"
    );
    Ok(dataset)
}

/// Turn the header row into unique column names.
///
/// Blank headers become `__EMPTY`, `__EMPTY_1`, ...; repeated names get
/// `_1`, `_2`, ... suffixes in order of appearance.
fn header_names(cells: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    cells
        .iter()
        .map(|cell| {
            let base = match cell_value(cell) {
                CellValue::Empty => EMPTY_HEADER.to_string(),
                value => value.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base.clone()
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Float(v) => CellValue::Number(*v),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::DateTime(v) => CellValue::Number(v.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
