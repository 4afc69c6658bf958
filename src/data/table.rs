//! Tabular store and row-limited dataset views.
//!
//! The store owns the active dataset for the session. A row limit never
//! touches the dataset itself; it only narrows the [`DatasetView`] handed to
//! chart shaping and insights to a prefix of the rows.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut store = TabularStore::new();
//! store.set_active(dataset);
//! store.apply_limit(3);
//! let view = store.view().unwrap();
//! assert_eq!(view.row_count(), 3);
//! ```

use crate::types::{Dataset, Row};

/// A read-only, optionally row-limited window over a dataset
#[derive(Clone, Copy, Debug)]
pub struct DatasetView<'a> {
    dataset: &'a Dataset,
    limit: Option<usize>,
}

impl<'a> DatasetView<'a> {
    /// A view over every row
    pub fn full(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            limit: None,
        }
    }

    /// A view over the first `limit` rows (clamped to the row count)
    pub fn limited(dataset: &'a Dataset, limit: usize) -> Self {
        Self {
            dataset,
            limit: Some(limit.min(dataset.row_count())),
        }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn columns(&self) -> &'a [String] {
        self.dataset.columns()
    }

    /// Rows in the view, always a prefix of the dataset's rows
    pub fn rows(&self) -> &'a [Row] {
        let rows = self.dataset.rows();
        match self.limit {
            Some(limit) => &rows[..limit.min(rows.len())],
            None => rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    pub fn full_row_count(&self) -> usize {
        self.dataset.row_count()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.dataset.column_index(name)
    }

    /// The first `min(k, row_count)` rows of the view
    pub fn preview(&self, k: usize) -> &'a [Row] {
        let rows = self.rows();
        &rows[..k.min(rows.len())]
    }
}

/// Holds the active dataset and the current row limit
#[derive(Clone, Debug, Default)]
pub struct TabularStore {
    active: Option<Dataset>,
    limit: Option<usize>,
}

impl TabularStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active dataset and clear any limit
    pub fn set_active(&mut self, dataset: Dataset) {
        self.active = Some(dataset);
        self.limit = None;
    }

    pub fn has_data(&self) -> bool {
        self.active.is_some()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.active.as_ref()
    }

    /// Restrict the view to the first `n` rows.
    ///
    /// A non-positive `n` clears the limit; otherwise it is clamped to
    /// `[1, row_count]`. Returns the limit now in effect.
    pub fn apply_limit(&mut self, n: i64) -> Option<usize> {
        self.limit = match (&self.active, n) {
            (_, n) if n <= 0 => None,
            (Some(dataset), n) => {
                let n = usize::try_from(n).unwrap_or(usize::MAX);
                Some(n.min(dataset.row_count()).max(1))
            }
            (None, _) => None,
        };
        self.limit
    }

    pub fn clear_limit(&mut self) {
        self.limit = None;
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// The current view, if a dataset is active
    pub fn view(&self) -> Option<DatasetView<'_>> {
        self.active.as_ref().map(|dataset| DatasetView {
            dataset,
            limit: self.limit,
        })
    }

    /// The first `min(k, view rows)` rows of the current view
    pub fn preview_rows(&self, k: usize) -> &[Row] {
        self.view().map(|view| view.preview(k)).unwrap_or(&[])
    }
}

/// Parse the row-limit control's text the way an integer prefix reader does.
///
/// `"25"`, `" 25 rows"` and `"25.9"` all read as `25`; text without leading
/// digits yields `None` (no limit).
pub fn parse_limit_input(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

/// Format row count with thousands abbreviation (e.g., "1.2K rows")
pub fn format_row_count(count: usize) -> String {
    let formatted = if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    };

    if count == 1 {
        format!("{} row", formatted)
    } else {
        format!("{} rows", formatted)
    }
}
