//! Application lifecycle - construction and read accessors.

use super::state::{AdminState, AnalysisState, AnalyticsApp, AppState, NavigationState};
use super::{ChartOutput, Page};
use crate::admin::AdminSession;
use crate::config::AnalyticsConfig;
use crate::data::{CalamineParser, DatasetView, SpreadsheetParser};
use crate::notifications::{Toast, ToastManager};
use crate::perf::PipelineStats;
use crate::storage::{FileStore, KeyValueStore, PersistenceBridge, StoredFile, UsageCounters};
use crate::types::{ChartKind, Dataset, Row};
use std::path::PathBuf;

impl<S: KeyValueStore> AnalyticsApp<S> {
    /// Controller over `store`, parsing uploads with calamine
    pub fn new(store: S, config: AnalyticsConfig) -> Self {
        Self::with_parser(store, config, Box::new(CalamineParser))
    }

    pub fn with_parser(
        store: S,
        config: AnalyticsConfig,
        parser: Box<dyn SpreadsheetParser>,
    ) -> Self {
        let session = AdminSession::new(config.admin_credential_sha256.clone());
        Self {
            config,
            parser,
            bridge: PersistenceBridge::new(store),
            state: AppState {
                analysis: AnalysisState::default(),
                navigation: NavigationState::default(),
                admin: AdminState { session },
                toasts: ToastManager::new(),
                perf: PipelineStats::new(),
            },
        }
    }

    pub(crate) fn show_toast(&mut self, toast: Toast) {
        self.state.toasts.push(toast);
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn bridge(&self) -> &PersistenceBridge<S> {
        &self.bridge
    }

    pub fn page(&self) -> Page {
        self.state.navigation.page
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.state.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastManager {
        &mut self.state.toasts
    }

    pub fn has_data(&self) -> bool {
        self.state.analysis.table.has_data()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.state.analysis.table.dataset()
    }

    /// The active dataset as narrowed by the row limit
    pub fn view(&self) -> Option<DatasetView<'_>> {
        self.state.analysis.table.view()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.state.analysis.file_name.as_deref()
    }

    pub fn chart_kind(&self) -> ChartKind {
        self.state.analysis.chart_kind
    }

    pub fn chart(&self) -> Option<&ChartOutput> {
        self.state.analysis.chart.as_ref()
    }

    /// Data preview rows of the current view
    pub fn preview_rows(&self) -> &[Row] {
        self.state.analysis.table.preview_rows(self.config.preview_rows)
    }

    /// Files for the home page, newest first
    pub fn recent_files(&self) -> Vec<StoredFile> {
        self.bridge.recent_files(self.config.recent_files)
    }

    pub fn counters(&self) -> UsageCounters {
        self.bridge.counters()
    }
}

impl AnalyticsApp<FileStore> {
    /// Controller over the configured (or platform default) store file
    pub fn open(config: AnalyticsConfig) -> std::io::Result<Self> {
        let path: PathBuf = config.resolved_storage_path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "No data directory available")
        })?;
        tracing::debug!(path = %path.display(), "Opening store");
        Ok(Self::new(FileStore::new(path), config))
    }
}
