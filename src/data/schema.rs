//! Schema inference
//!
//! Column names and per-column value types are derived strictly from row 0;
//! later rows are never consulted.

use crate::data::error::{DataError, DataResult};
use crate::types::{ColumnType, Dataset};

/// Ordered column names of a dataset.
///
/// Fails with [`DataError::EmptyDataset`] when the dataset has no rows.
pub fn columns_of(dataset: &Dataset) -> DataResult<&[String]> {
    if dataset.is_empty() {
        return Err(DataError::EmptyDataset);
    }
    Ok(dataset.columns())
}

/// Value type of each column, read from row 0
pub fn column_types(dataset: &Dataset) -> DataResult<Vec<(String, ColumnType)>> {
    let columns = columns_of(dataset)?;
    let first = &dataset.rows()[0];
    Ok(columns
        .iter()
        .zip(&first.cells)
        .map(|(name, cell)| (name.clone(), cell.column_type()))
        .collect())
}

/// Columns whose row-0 value is numeric, in column order
pub fn numeric_columns(dataset: &Dataset) -> DataResult<Vec<String>> {
    Ok(column_types(dataset)?
        .into_iter()
        .filter(|(_, ty)| *ty == ColumnType::Number)
        .map(|(name, _)| name)
        .collect())
}
