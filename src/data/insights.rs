//! Summary statistics over a chosen column pair.
//!
//! Values of the y column go through the same parse-or-zero coercion as
//! chart shaping. The max/min are attributed to the first row holding them.

use crate::constants::{DEFAULT_FRACTION_DIGITS, SUMMARY_FRACTION_DIGITS};
use crate::data::chart_engine::extract_columns;
use crate::data::error::{DataError, DataResult};
use crate::data::table::DatasetView;
use crate::perf::ScopedTimer;
use crate::types::CellValue;
use serde::Serialize;

/// Numeric summary of one y column, labelled by the x column
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub x_column: String,
    pub y_column: String,
    pub count: usize,
    pub average: f64,
    pub total: f64,
    pub max: f64,
    /// x value of the first row holding `max`
    pub max_label: CellValue,
    pub min: f64,
    /// x value of the first row holding `min`
    pub min_label: CellValue,
    pub range: f64,
}

/// Human-readable statements derived from a [`ColumnSummary`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InsightSet {
    pub summary: ColumnSummary,
    pub statements: Vec<String>,
}

impl InsightSet {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.statements.iter().map(String::as_str)
    }
}

/// Compute the summary for `y_column`, labelled by `x_column`.
///
/// Fails with [`DataError::EmptyView`] when the view has no rows and with
/// [`DataError::MissingColumn`] when either column is unknown.
pub fn summarize_column(
    view: &DatasetView<'_>,
    x_column: &str,
    y_column: &str,
) -> DataResult<ColumnSummary> {
    let (labels, values) = extract_columns(view, x_column, y_column)?;
    if values.is_empty() {
        return Err(DataError::EmptyView);
    }

    let total: f64 = values.iter().sum();
    let average = total / values.len() as f64;

    let mut max_idx = 0;
    let mut min_idx = 0;
    for (i, &value) in values.iter().enumerate().skip(1) {
        if value > values[max_idx] {
            max_idx = i;
        }
        if value < values[min_idx] {
            min_idx = i;
        }
    }
    let max = values[max_idx];
    let min = values[min_idx];

    Ok(ColumnSummary {
        x_column: x_column.to_string(),
        y_column: y_column.to_string(),
        count: values.len(),
        average,
        total,
        max,
        max_label: labels[max_idx].clone(),
        min,
        min_label: labels[min_idx].clone(),
        range: max - min,
    })
}

/// Summarize the column pair and render the insight statements
pub fn summarize(view: &DatasetView<'_>, x_column: &str, y_column: &str) -> DataResult<InsightSet> {
    let _timer = ScopedTimer::with_default_threshold("summarize");

    let summary = summarize_column(view, x_column, y_column)?;
    let statements = render_statements(&summary);
    Ok(InsightSet {
        summary,
        statements,
    })
}

fn render_statements(s: &ColumnSummary) -> Vec<String> {
    let max = format_number(s.max, DEFAULT_FRACTION_DIGITS);
    let min = format_number(s.min, DEFAULT_FRACTION_DIGITS);
    vec![
        format!(
            "📊 The average {} across all {} categories is {}.",
            s.y_column,
            s.x_column,
            format_number(s.average, SUMMARY_FRACTION_DIGITS)
        ),
        format!(
            "🏆 Peak performance was achieved by \"{}\" with a {} of {}.",
            s.max_label, s.y_column, max
        ),
        format!(
            "📉 The lowest {} value of {} was recorded for \"{}\".",
            s.y_column, min, s.min_label
        ),
        format!(
            "💰 Total {} across all categories amounts to {}.",
            s.y_column,
            format_number(s.total, SUMMARY_FRACTION_DIGITS)
        ),
        format!(
            "📈 The data shows a range from {} to {}, indicating a variance of {}.",
            min,
            max,
            format_number(s.range, DEFAULT_FRACTION_DIGITS)
        ),
    ]
}

/// Format a number with comma thousands separators and at most
/// `max_fraction_digits` fraction digits (trailing zeros dropped).
pub fn format_number(value: f64, max_fraction_digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.*}", max_fraction_digits, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}
