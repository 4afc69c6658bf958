//! Data visualization methods - row limits, column selection, charts and
//! exports

use super::state::{AnalyticsApp, AppState};
use super::{AppError, AppResult, ChartOutput, Page};
use crate::constants::{EXPORT_HEIGHT, EXPORT_WIDTH};
use crate::data::{columns_of, parse_limit_input, shape, summarize};
use crate::export::{ExportError, ExportFormat, ExportSink, ExportedFile, export_chart, render_chart_preview};
use crate::notifications::Toast;
use crate::storage::{CounterKind, KeyValueStore};
use crate::types::ChartKind;
use chrono::Utc;
use image::RgbaImage;
use tracing::{debug, warn};

impl<S: KeyValueStore> AnalyticsApp<S> {
    /// Open the analysis page for the active dataset, returning the column
    /// names for the axis selectors. Any previous row limit is cleared.
    pub fn start_analysis(&mut self) -> AppResult<Vec<String>> {
        let Some(dataset) = self.state.analysis.table.dataset() else {
            self.show_toast(Toast::error("No data available for analysis"));
            return Err(AppError::NoDataset);
        };
        let columns = match columns_of(dataset) {
            Ok(columns) => columns.to_vec(),
            Err(e) => {
                self.show_toast(Toast::error(e.to_string()));
                return Err(e.into());
            }
        };
        self.state.analysis.table.clear_limit();
        self.state.navigation.page = Page::Analysis;
        Ok(columns)
    }

    /// Column names offered by the axis selectors
    pub fn column_options(&self) -> AppResult<Vec<String>> {
        let dataset = self.dataset().ok_or(AppError::NoDataset)?;
        Ok(columns_of(dataset)?.to_vec())
    }

    /// Apply the row-limit control's text. Empty, non-numeric or
    /// non-positive input analyses every row. Returns the limit in effect.
    pub fn apply_limit_input(&mut self, text: &str) -> AppResult<Option<usize>> {
        if !self.has_data() {
            self.show_toast(Toast::error("No data available for analysis"));
            return Err(AppError::NoDataset);
        }
        let requested = parse_limit_input(text).unwrap_or(0);
        let limit = self.state.analysis.table.apply_limit(requested);
        match limit {
            Some(n) => self.show_toast(Toast::info(format!("Analyzing first {} rows of data", n))),
            None => self.show_toast(Toast::info("Analyzing all data rows")),
        }
        Ok(limit)
    }

    pub fn select_chart_kind(&mut self, kind: ChartKind) {
        self.state.analysis.chart_kind = kind;
    }

    /// Shape the current view for the selected chart kind and summarise it.
    ///
    /// Counts a chart on success. On failure the previous chart is kept.
    pub fn generate_chart(&mut self, x_column: &str, y_column: &str) -> AppResult<&ChartOutput> {
        if x_column.is_empty() || y_column.is_empty() {
            self.show_toast(Toast::error("Please select both X and Y axes"));
            return Err(AppError::AxesNotSelected);
        }
        if !self.has_data() {
            self.show_toast(Toast::error("No data available for analysis"));
            return Err(AppError::NoDataset);
        }

        let kind = self.state.analysis.chart_kind;
        let AppState { analysis, perf, .. } = &mut self.state;
        let result = analysis
            .table
            .view()
            .ok_or(AppError::NoDataset)
            .and_then(|view| {
                let series = perf.time("shape", || shape(&view, x_column, y_column, kind))?;
                let insights = perf.time("summarize", || summarize(&view, x_column, y_column))?;
                Ok((series, insights))
            });

        let (series, insights) = match result {
            Ok(output) => output,
            Err(e) => {
                self.show_toast(Toast::error(e.to_string()));
                return Err(e);
            }
        };

        debug!(kind = kind.id(), points = series.len(), "Chart generated");
        if let Err(e) = self.bridge.increment_counter(CounterKind::Charts) {
            warn!("Failed to count chart: {}", e);
        }
        self.show_toast(Toast::success("Chart generated successfully!"));

        Ok(self
            .state
            .analysis
            .chart
            .insert(ChartOutput { series, insights }))
    }

    /// Export the current chart as a rasterised preview
    pub fn export_chart(
        &mut self,
        format: ExportFormat,
        sink: &mut dyn ExportSink,
    ) -> AppResult<ExportedFile> {
        let Some(chart) = self.state.analysis.chart.as_ref() else {
            self.show_toast(Toast::error("No chart available to export"));
            return Err(ExportError::NoChart.into());
        };
        let image = render_chart_preview(&chart.series, EXPORT_WIDTH, EXPORT_HEIGHT);
        self.export_image(&image, format, sink)
    }

    /// Export an image rendered by the plotting backend.
    ///
    /// Counts a download only once the sink has accepted the file.
    pub fn export_image(
        &mut self,
        image: &RgbaImage,
        format: ExportFormat,
        sink: &mut dyn ExportSink,
    ) -> AppResult<ExportedFile> {
        if self.state.analysis.chart.is_none() {
            self.show_toast(Toast::error("No chart available to export"));
            return Err(ExportError::NoChart.into());
        }

        let result = export_chart(image, format, Utc::now()).and_then(|file| {
            sink.save(&file).map_err(ExportError::Sink)?;
            Ok(file)
        });
        let file = match result {
            Ok(file) => file,
            Err(e) => {
                self.show_toast(Toast::error(e.to_string()));
                return Err(e.into());
            }
        };

        if let Err(e) = self.bridge.increment_counter(CounterKind::Downloads) {
            warn!("Failed to count download: {}", e);
        }
        self.show_toast(Toast::success(format!("Chart exported as {}", format.label())));
        Ok(file)
    }
}
