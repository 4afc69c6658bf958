//! Sheetlytics - spreadsheet analytics pipeline.
//!
//! Ingests the first sheet of an `.xls`/`.xlsx` upload, exposes its columns
//! for axis selection, shapes chart series over an optionally row-limited
//! view, derives summary insights and keeps uploads and usage counters in a
//! key/value store.

pub mod admin;
pub mod app;
pub mod config;
pub mod constants;
pub mod data;
pub mod export;
pub mod logging;
pub mod notifications;
pub mod pdf;
pub mod perf;
pub mod storage;
pub mod types;

pub use app::AnalyticsApp;
