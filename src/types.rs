//! Core types for the Sheetlytics pipeline.
//!
//! This module defines the fundamental data structures shared by ingestion,
//! the tabular store, chart shaping and persistence: cell values, rows,
//! datasets and the closed set of chart kinds.

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Cells
// ============================================================================

/// A single scalar cell value
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    #[default]
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Parse the cell as a float the way a lenient numeric reader does:
    /// numbers pass through, text is read up to its longest numeric prefix.
    /// Returns `None` when no number can be read.
    pub fn parse_number(&self) -> Option<f64> {
        let parsed = match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => parse_float_prefix(s),
            CellValue::Bool(_) | CellValue::Empty => None,
        };
        parsed.filter(|n| !n.is_nan())
    }

    /// Numeric coercion used for chart values and insights.
    ///
    /// Unparseable cells become `0.0`; this zero-fill is silent.
    pub fn coerce_number(&self) -> f64 {
        self.parse_number().unwrap_or(0.0)
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            CellValue::Number(_) => ColumnType::Number,
            CellValue::Text(_) => ColumnType::Text,
            CellValue::Bool(_) => ColumnType::Boolean,
            CellValue::Empty => ColumnType::Empty,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CellVisitor)
    }
}

struct CellVisitor;

impl<'de> Visitor<'de> for CellVisitor {
    type Value = CellValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, string, boolean or null")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<CellValue, E> {
        Ok(CellValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<CellValue, E> {
        Ok(CellValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<CellValue, E> {
        Ok(CellValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<CellValue, E> {
        Ok(CellValue::Text(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<CellValue, E> {
        Ok(CellValue::Empty)
    }
}

/// Read the longest leading float literal of `text`.
///
/// Leading whitespace is skipped and trailing garbage ignored, so
/// `"42.5kg"` reads as `42.5` while `"abc"` and `""` yield `None`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < len && bytes[end] == b'.' {
        let mut cursor = end + 1;
        while cursor < len && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        frac_digits = cursor - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = cursor;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut cursor = end + 1;
        if cursor < len && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
            cursor += 1;
        }
        let exp_start = cursor;
        while cursor < len && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_start {
            end = cursor;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Value type of a column, taken from its row-0 cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Number,
    Text,
    Boolean,
    Empty,
}

// ============================================================================
// Rows & Datasets
// ============================================================================

/// An ordered key/value record as produced by the spreadsheet parser
pub type Record = Vec<(String, CellValue)>;

/// A row of cells, aligned with the owning dataset's columns
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }
}

/// An ordered, uniformly-keyed collection of rows.
///
/// `columns` is fixed when the dataset is built and never recomputed; a
/// dataset is not mutated after construction. Row-limited windows are
/// provided by [`crate::data::DatasetView`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from explicit columns and rows.
    ///
    /// Rows shorter than the column list are padded with empty cells, longer
    /// rows are truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.cells.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Build a dataset from parser records.
    ///
    /// Columns are the keys of the first record in first-seen order. Later
    /// records are projected onto those columns: missing keys become empty
    /// cells and keys unknown to the first record are dropped.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        if let Some(first) = records.first() {
            for (key, _) in first {
                if !index.contains_key(key) {
                    index.insert(key.clone(), columns.len());
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|record| {
                let mut cells = vec![CellValue::Empty; columns.len()];
                for (key, value) in record {
                    if let Some(&i) = index.get(&key) {
                        cells[i] = value;
                    }
                }
                Row::new(cells)
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Serializes a row as a JSON object keyed by column name
struct RowObject<'a> {
    columns: &'a [String],
    row: &'a Row,
}

impl Serialize for RowObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, cell) in self.columns.iter().zip(&self.row.cells) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowObject {
                columns: &self.columns,
                row,
            })?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(DatasetVisitor)
    }
}

struct DatasetVisitor;

impl<'de> Visitor<'de> for DatasetVisitor {
    type Value = Dataset;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of row objects")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Dataset, A::Error> {
        let mut records = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(OrderedRecord(record)) = seq.next_element()? {
            records.push(record);
        }
        Ok(Dataset::from_records(records))
    }
}

/// A record deserialized with its keys kept in document order
struct OrderedRecord(Record);

impl<'de> Deserialize<'de> for OrderedRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedRecordVisitor)
    }
}

struct OrderedRecordVisitor;

impl<'de> Visitor<'de> for OrderedRecordVisitor {
    type Value = OrderedRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a row object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<OrderedRecord, A::Error> {
        let mut record = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, CellValue>()? {
            record.push((key, value));
        }
        Ok(OrderedRecord(record))
    }
}

// ============================================================================
// Chart Types
// ============================================================================

/// Types of charts available
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Scatter,
    Bar3d,
}

impl ChartKind {
    /// Stable identifier used by selectors and persisted configs
    pub fn id(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Bar3d => "bar3d",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
            ChartKind::Pie => "Pie",
            ChartKind::Scatter => "Scatter",
            ChartKind::Bar3d => "3D Bar",
        }
    }

    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::Bar,
            ChartKind::Line,
            ChartKind::Pie,
            ChartKind::Scatter,
            ChartKind::Bar3d,
        ]
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::all()
            .iter()
            .copied()
            .find(|kind| kind.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown chart kind: {}", s))
    }
}
