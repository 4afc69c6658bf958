//! Error types for data operations
//!
//! Provides unified error handling for ingestion, views, chart shaping and
//! insight computation. Every variant is terminal for the operation that
//! raised it but leaves previously loaded state untouched.

use thiserror::Error;

pub use crate::constants::MAX_UPLOAD_SIZE_MB;

/// Errors that can occur during data operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// Neither the extension nor the declared MIME type is a spreadsheet
    #[error("Invalid file format: {name} (expected .xls or .xlsx)")]
    InvalidFormat { name: String },

    /// File exceeds the upload size limit
    #[error("File too large: {size_mb:.1}MB (max {max_mb}MB)")]
    TooLarge { size_mb: f64, max_mb: u64 },

    /// The spreadsheet parser failed or produced no rows
    #[error("Failed to parse spreadsheet: {0}")]
    ParseFailure(String),

    /// Dataset has no rows
    #[error("Dataset is empty")]
    EmptyDataset,

    /// A selected column is not part of the dataset
    #[error("Column not found: {0}")]
    MissingColumn(String),

    /// The current view has no rows to summarize
    #[error("No rows in the current view")]
    EmptyView,
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
