//! Chart data shaping engine
//!
//! Maps a dataset view, an x column, a y column and a chart kind to a
//! renderer-agnostic [`ChartSeries`]. No grouping, aggregation, binning or
//! sorting happens here: every row of the view becomes one point, in row
//! order, so `x_labels.len() == y_values.len() == view.row_count()`.

use crate::constants::{BAR3D_MAX_HEIGHT, CHART_COLORS};
use crate::data::error::{DataError, DataResult};
use crate::data::table::DatasetView;
use crate::perf::ScopedTimer;
use crate::types::{CellValue, ChartKind};
use serde::Serialize;

/// Processed chart data ready for a plotting backend
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    /// X-axis column name
    pub x_column: String,
    /// Y-axis column name
    pub y_column: String,
    /// Raw x values, one per row
    pub x_labels: Vec<CellValue>,
    /// Numeric y values, one per row (unparseable cells are 0)
    pub y_values: Vec<f64>,
    /// Largest y value (0 for an empty series)
    pub max_value: f64,
    /// Smallest y value (0 for an empty series)
    pub min_value: f64,
    /// Kind-specific extras
    pub layout: SeriesLayout,
}

/// Kind-specific shaping output
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeriesLayout {
    /// Bar and line charts: labels and values as-is
    Categorical,
    /// Pie charts: one slice per row with its own color
    Distribution { colors: Vec<String> },
    /// Scatter charts: numeric x positions
    Correlation { x_positions: Vec<f64> },
    /// 3D bars: heights scaled so the largest bar is [`BAR3D_MAX_HEIGHT`]
    Volumetric { heights: Vec<f64> },
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.y_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y_values.is_empty()
    }

    /// Title shown above the chart
    pub fn title(&self) -> String {
        match self.kind {
            ChartKind::Bar3d => format!("3D {} by {}", self.y_column, self.x_column),
            _ => format!("{} by {}", self.y_column, self.x_column),
        }
    }

    /// `(x, y)` pairs for scatter plots, `None` for other kinds
    pub fn points(&self) -> Option<Vec<(f64, f64)>> {
        match &self.layout {
            SeriesLayout::Correlation { x_positions } => Some(
                x_positions
                    .iter()
                    .copied()
                    .zip(self.y_values.iter().copied())
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// Resolve both column names against the view
fn column_pair(view: &DatasetView<'_>, x: &str, y: &str) -> DataResult<(usize, usize)> {
    let x_idx = view
        .column_index(x)
        .ok_or_else(|| DataError::MissingColumn(x.to_string()))?;
    let y_idx = view
        .column_index(y)
        .ok_or_else(|| DataError::MissingColumn(y.to_string()))?;
    Ok((x_idx, y_idx))
}

/// Raw x labels and coerced y values of the view, in row order
pub fn extract_columns(
    view: &DatasetView<'_>,
    x_column: &str,
    y_column: &str,
) -> DataResult<(Vec<CellValue>, Vec<f64>)> {
    let (x_idx, y_idx) = column_pair(view, x_column, y_column)?;
    Ok(view
        .rows()
        .iter()
        .map(|row| {
            let label = row.cells.get(x_idx).cloned().unwrap_or_default();
            let value = row.cells.get(y_idx).map(CellValue::coerce_number).unwrap_or(0.0);
            (label, value)
        })
        .unzip())
}

/// Shape the view into a series for `kind`.
///
/// Fails with [`DataError::MissingColumn`] when either column is unknown.
pub fn shape(
    view: &DatasetView<'_>,
    x_column: &str,
    y_column: &str,
    kind: ChartKind,
) -> DataResult<ChartSeries> {
    let _timer = ScopedTimer::with_default_threshold("shape");

    let (x_labels, y_values) = extract_columns(view, x_column, y_column)?;
    let layout = match kind {
        ChartKind::Bar | ChartKind::Line => SeriesLayout::Categorical,
        ChartKind::Pie => shape_distribution(&y_values),
        ChartKind::Scatter => shape_correlation(&x_labels),
        ChartKind::Bar3d => shape_volumetric(&y_values),
    };

    let (min_value, max_value) = value_bounds(&y_values);

    Ok(ChartSeries {
        kind,
        x_column: x_column.to_string(),
        y_column: y_column.to_string(),
        x_labels,
        y_values,
        max_value,
        min_value,
        layout,
    })
}

/// One slice per row; duplicate labels stay separate slices
fn shape_distribution(values: &[f64]) -> SeriesLayout {
    let colors = (0..values.len())
        .map(|i| CHART_COLORS[i % CHART_COLORS.len()].to_string())
        .collect();
    SeriesLayout::Distribution { colors }
}

/// Labels parsed as floats; unparseable labels fall back to the row index
fn shape_correlation(labels: &[CellValue]) -> SeriesLayout {
    let x_positions = labels
        .iter()
        .enumerate()
        .map(|(i, label)| label.parse_number().unwrap_or(i as f64))
        .collect();
    SeriesLayout::Correlation { x_positions }
}

fn shape_volumetric(values: &[f64]) -> SeriesLayout {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let heights = values
        .iter()
        .map(|v| {
            if max > 0.0 {
                v / max * BAR3D_MAX_HEIGHT
            } else {
                0.0
            }
        })
        .collect();
    SeriesLayout::Volumetric { heights }
}

fn value_bounds(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}
