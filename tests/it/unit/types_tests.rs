//! Cell, dataset and chart-kind tests

use crate::helpers::{TestDatasetBuilder, business_dataset};
use sheetlytics::types::{CellValue, ChartKind, Dataset, parse_float_prefix};

#[test]
fn test_coerce_number_zero_fills() {
    assert_eq!(CellValue::text("abc").coerce_number(), 0.0);
    assert_eq!(CellValue::text("42.5").coerce_number(), 42.5);
    assert_eq!(CellValue::Number(7.0).coerce_number(), 7.0);
    assert_eq!(CellValue::Empty.coerce_number(), 0.0);
}

#[test]
fn test_parse_number_reads_leading_prefix() {
    assert_eq!(CellValue::text("12 units").parse_number(), Some(12.0));
    assert_eq!(CellValue::text("units").parse_number(), None);
    assert_eq!(parse_float_prefix("-3.5e2x"), Some(-350.0));
}

#[test]
fn test_cell_display() {
    assert_eq!(CellValue::text("North").to_string(), "North");
    assert_eq!(CellValue::Empty.to_string(), "");
}

#[test]
fn test_chart_kind_parsing() {
    assert_eq!("bar".parse(), Ok(ChartKind::Bar));
    assert_eq!(" Scatter ".parse(), Ok(ChartKind::Scatter));
    assert_eq!("bar3d".parse(), Ok(ChartKind::Bar3d));
    assert!("radar".parse::<ChartKind>().is_err());

    for kind in ChartKind::all() {
        assert_eq!(kind.id().parse(), Ok(*kind));
    }
}

#[test]
fn test_dataset_json_round_trip() {
    let ds = business_dataset();
    let json = serde_json::to_string(&ds).unwrap();
    assert!(json.starts_with(r#"[{"Month":"January","Sales":25000.0"#));

    let back: Dataset = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ds);
}

#[test]
fn test_dataset_json_keeps_empty_cells() {
    let ds = TestDatasetBuilder::new(&["name", "score"])
        .row(vec!["a".into(), CellValue::Empty])
        .row(vec!["b".into(), 3.0.into()])
        .build();

    let json = serde_json::to_value(&ds).unwrap();
    assert_eq!(json[0]["score"], serde_json::Value::Null);

    let back: Dataset = serde_json::from_value(json).unwrap();
    assert_eq!(back.columns(), ["name", "score"]);
    assert_eq!(back, ds);
}
