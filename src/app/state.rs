//! Application state - the AnalyticsApp struct definition and sub-structs.

use super::{ChartOutput, Page};
use crate::admin::AdminSession;
use crate::config::AnalyticsConfig;
use crate::data::{SpreadsheetParser, TabularStore};
use crate::notifications::ToastManager;
use crate::perf::PipelineStats;
use crate::storage::{KeyValueStore, PersistenceBridge};
use crate::types::ChartKind;

/// Analysis session - the active dataset, its limit and the last chart
#[derive(Debug, Default)]
pub struct AnalysisState {
    /// Active dataset and row limit
    pub table: TabularStore,
    /// Name of the file the active dataset came from
    pub file_name: Option<String>,
    /// Selected chart kind
    pub chart_kind: ChartKind,
    /// Last generated chart, if any
    pub chart: Option<ChartOutput>,
}

impl AnalysisState {
    /// Replace the active dataset and drop the chart built from the old one
    pub(crate) fn activate(&mut self, dataset: crate::types::Dataset, file_name: String) {
        self.table.set_active(dataset);
        self.file_name = Some(file_name);
        self.chart = None;
    }
}

#[derive(Debug, Default)]
pub struct NavigationState {
    pub page: Page,
}

#[derive(Debug)]
pub struct AdminState {
    pub session: AdminSession,
}

/// Session state owned by the controller
#[derive(Debug)]
pub struct AppState {
    pub analysis: AnalysisState,
    pub navigation: NavigationState,
    pub admin: AdminState,
    pub toasts: ToastManager,
    pub perf: PipelineStats,
}

/// The analytics controller.
///
/// Owns the session [`AppState`] and the [`PersistenceBridge`]; every
/// user action goes through one of its methods.
pub struct AnalyticsApp<S: KeyValueStore> {
    pub(crate) config: AnalyticsConfig,
    pub(crate) parser: Box<dyn SpreadsheetParser>,
    pub(crate) bridge: PersistenceBridge<S>,
    pub(crate) state: AppState,
}
