//! Application-wide constants.
//!
//! Centralizes limits, storage keys and palette values so the pipeline,
//! the persistence bridge and the controller agree on them.

// ============================================================================
// Ingestion Limits
// ============================================================================

/// Maximum accepted upload size in MiB
pub const MAX_UPLOAD_SIZE_MB: u64 = 10;

/// Maximum accepted upload size in bytes
pub const MAX_UPLOAD_BYTES: u64 = MAX_UPLOAD_SIZE_MB * 1024 * 1024;

/// Spreadsheet file extensions accepted by the ingestion adapter (lowercase)
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".xls", ".xlsx"];

/// Declared MIME types accepted by the ingestion adapter
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Header used for blank header cells (`__EMPTY`, `__EMPTY_1`, ...)
pub const EMPTY_HEADER: &str = "__EMPTY";

// ============================================================================
// Views & Previews
// ============================================================================

/// Rows shown in the analysis page data preview
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Rows shown in the admin file-details preview
pub const FILE_DETAILS_PREVIEW_ROWS: usize = 10;

/// Number of files listed on the home page
pub const DEFAULT_RECENT_FILES: usize = 6;

/// Maximum notifications kept in the queue
pub const MAX_NOTIFICATIONS: usize = 20;

// ============================================================================
// Persistence
// ============================================================================

/// Key holding the JSON list of stored files
pub const FILES_KEY: &str = "uploadedFiles";

/// Key holding the JSON usage counters record
pub const STATS_KEY: &str = "platformStats";

/// Application directory name under the platform data/config dirs
pub const APP_DIR_NAME: &str = "sheetlytics";

// ============================================================================
// Charts
// ============================================================================

/// Chart color palette (hex), cycled for per-slice colors
pub const CHART_COLORS: [&str; 10] = [
    "#1FB8CD", "#FFC185", "#B4413C", "#ECEBD5", "#5D878F",
    "#DB4545", "#D2BA4C", "#964325", "#944454", "#13343B",
];

/// Height of the tallest bar in a 3D bar scene
pub const BAR3D_MAX_HEIGHT: f64 = 10.0;

/// Fraction digits used for the average and total insights
pub const SUMMARY_FRACTION_DIGITS: usize = 2;

/// Default fraction digits for other insight numbers
pub const DEFAULT_FRACTION_DIGITS: usize = 3;

/// Size of the rasterised chart used for exports
pub const EXPORT_WIDTH: u32 = 800;
pub const EXPORT_HEIGHT: u32 = 500;

// ============================================================================
// Admin
// ============================================================================

/// SHA-256 (hex) of the default shared admin credential
pub const DEFAULT_ADMIN_CREDENTIAL_SHA256: &str =
    "3b612c75a7b5048a435fb6ec81e52ff92d6d795a8b5a9c17070f6a63c97a53b2";

// ============================================================================
// Performance
// ============================================================================

/// Threshold in milliseconds above which pipeline steps log a warning
pub const SLOW_OPERATION_MS: f64 = 50.0;
