//! Application module - the analytics controller and its state.
//!
//! This module is organized into several submodules:
//! - `types` - Pages, chart output and controller errors
//! - `state` - The AnalyticsApp struct and its sub-structs
//! - `lifecycle` - Construction and accessors
//! - `file_management` - Upload, sample data, stored files
//! - `data_viz` - Row limits, column selection, charts and exports
//! - `admin_handlers` - Navigation and the admin dashboard

mod admin_handlers;
mod data_viz;
mod file_management;
mod lifecycle;
mod state;
mod types;

pub use file_management::{SAMPLE_FILE_NAME, sample_dataset};
pub use state::{AdminState, AnalysisState, AnalyticsApp, AppState, NavigationState};
pub use types::*;
