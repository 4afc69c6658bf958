//! Controller-level types

use crate::admin::AdminError;
use crate::data::{ChartSeries, DataError, InsightSet};
use crate::export::ExportError;
use crate::storage::StorageError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Top-level pages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Analysis,
    Admin,
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Analysis => "analysis",
            Page::Admin => "admin",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Page::Home),
            "analysis" => Ok(Page::Analysis),
            "admin" => Ok(Page::Admin),
            other => Err(format!("Unknown page: {}", other)),
        }
    }
}

/// A generated chart: the shaped series and its insights
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartOutput {
    pub series: ChartSeries,
    pub insights: InsightSet,
}

/// Errors returned by controller operations.
///
/// Each one has already been reported as an error toast when returned.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("No data available for analysis")]
    NoDataset,

    #[error("Please select both X and Y axes")]
    AxesNotSelected,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Admin login required")]
    AdminRequired,
}

pub type AppResult<T> = Result<T, AppError>;
