//! Pipeline Workflow Integration Tests

use crate::helpers::{
    ScriptedParser, TestDatasetBuilder, assert_close, business_app, business_dataset, records_of,
    xlsx_upload,
};
use sheetlytics::data::{
    DataError, DatasetView, SeriesLayout, TabularStore, columns_of, ingest, shape, summarize,
};
use sheetlytics::types::{CellValue, ChartKind};

#[test]
fn test_business_dataset_end_to_end() {
    let parser = ScriptedParser(Ok(records_of(&business_dataset())));
    let dataset = ingest(&xlsx_upload("business.xlsx", 2458), &parser).unwrap();
    assert_eq!(
        columns_of(&dataset).unwrap(),
        ["Month", "Sales", "Expenses", "Profit", "Region"]
    );

    let mut store = TabularStore::new();
    store.set_active(dataset);
    let view = store.view().unwrap();

    let series = shape(&view, "Month", "Sales", ChartKind::Bar).unwrap();
    let months: Vec<String> = series.x_labels.iter().map(|l| l.to_string()).collect();
    assert_eq!(months, ["January", "February", "March", "April", "May", "June"]);
    assert_eq!(
        series.y_values,
        vec![25000.0, 32000.0, 28000.0, 35000.0, 42000.0, 38000.0]
    );
    assert_eq!(series.title(), "Sales by Month");

    let insights = summarize(&view, "Month", "Sales").unwrap();
    assert_close(insights.summary.average, 200000.0 / 6.0);
    assert_eq!(insights.summary.max, 42000.0);
    assert_eq!(insights.summary.max_label, CellValue::text("May"));
    assert_eq!(insights.summary.min, 25000.0);
    assert_eq!(insights.summary.min_label, CellValue::text("January"));
    assert!(insights.statements[0].contains("33,333.33"));
}

#[test]
fn test_series_lengths_match_view_for_every_kind() {
    let ds = TestDatasetBuilder::new(&["x", "y"]).with_numbered_rows(17).build();
    for limit in [None, Some(5), Some(17)] {
        let view = match limit {
            Some(n) => DatasetView::limited(&ds, n),
            None => DatasetView::full(&ds),
        };
        for kind in ChartKind::all() {
            let series = shape(&view, "x", "y", *kind).unwrap();
            assert_eq!(series.y_values.len(), view.row_count(), "{:?}", kind);
            assert_eq!(series.x_labels.len(), view.row_count(), "{:?}", kind);
        }
    }
}

#[test]
fn test_limit_and_preview_property() {
    let full = 12;
    let ds = TestDatasetBuilder::new(&["x", "y"]).with_numbered_rows(full).build();

    for n in [-3_i64, 0, 1, full as i64, full as i64 + 50] {
        for k in [0_usize, 1, 5, 100] {
            let mut store = TabularStore::new();
            store.set_active(ds.clone());
            store.apply_limit(n);

            let effective = if n <= 0 { full } else { (n as usize).min(full) };
            let preview = store.preview_rows(k);
            assert_eq!(preview.len(), k.min(effective));
            assert_eq!(preview, &ds.rows()[..preview.len()]);
            assert_eq!(store.view().unwrap().columns(), ds.columns());
        }
    }
}

#[test]
fn test_numeric_coercion_is_zero_fill() {
    let ds = TestDatasetBuilder::new(&["x", "y"])
        .row(vec!["a".into(), "abc".into()])
        .row(vec!["b".into(), "42.5".into()])
        .row(vec!["c".into(), 7.0.into()])
        .row(vec!["d".into(), CellValue::Empty])
        .build();
    let view = DatasetView::full(&ds);

    let series = shape(&view, "x", "y", ChartKind::Line).unwrap();
    assert_eq!(series.y_values, vec![0.0, 42.5, 7.0, 0.0]);

    let summary = summarize(&view, "x", "y").unwrap().summary;
    assert_close(summary.average, 49.5 / 4.0);
    assert_eq!(summary.min_label, CellValue::text("a"));
}

#[test]
fn test_max_tie_goes_to_first_row() {
    let ds = TestDatasetBuilder::new(&["x", "y"])
        .row(vec!["A".into(), 10.0.into()])
        .row(vec!["B".into(), 10.0.into()])
        .build();
    let summary = summarize(&DatasetView::full(&ds), "x", "y").unwrap().summary;
    assert_eq!(summary.max_label, CellValue::text("A"));
}

#[test]
fn test_pie_keeps_duplicate_categories_as_slices() {
    let ds = business_dataset();
    let series = shape(&DatasetView::full(&ds), "Region", "Profit", ChartKind::Pie).unwrap();

    let north = series
        .x_labels
        .iter()
        .filter(|l| **l == CellValue::text("North"))
        .count();
    assert_eq!(north, 2);
    assert_eq!(series.len(), 6);
    assert!(matches!(series.layout, SeriesLayout::Distribution { ref colors } if colors.len() == 6));
}

#[test]
fn test_scatter_over_text_labels_uses_row_index() {
    let ds = business_dataset();
    let series = shape(&DatasetView::full(&ds), "Month", "Sales", ChartKind::Scatter).unwrap();
    let xs: Vec<f64> = series.points().unwrap().iter().map(|(x, _)| *x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_scatter_over_numeric_columns() {
    let ds = business_dataset();
    let series = shape(&DatasetView::full(&ds), "Expenses", "Profit", ChartKind::Scatter).unwrap();
    assert_eq!(series.points().unwrap()[0], (18000.0, 7000.0));
}

#[test]
fn test_bar3d_tallest_bar_is_may() {
    let ds = business_dataset();
    let series = shape(&DatasetView::full(&ds), "Month", "Sales", ChartKind::Bar3d).unwrap();
    match &series.layout {
        SeriesLayout::Volumetric { heights } => {
            assert_eq!(heights[4], 10.0);
            assert_close(heights[0], 25000.0 / 42000.0 * 10.0);
        }
        other => panic!("Expected volumetric layout, got {:?}", other),
    }
    assert_eq!(series.title(), "3D Sales by Month");
}

#[test]
fn test_empty_sheet_is_rejected() {
    let parser = ScriptedParser(Ok(vec![]));
    assert!(matches!(
        ingest(&xlsx_upload("empty.xlsx", 10), &parser),
        Err(DataError::ParseFailure(_))
    ));
}

#[test]
fn test_declared_mime_type_is_accepted() {
    let parser = ScriptedParser(Ok(records_of(&business_dataset())));
    let upload = xlsx_upload("export", 2458)
        .with_mime_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
    assert_eq!(ingest(&upload, &parser).unwrap().row_count(), 6);

    let csv = xlsx_upload("export.csv", 2458).with_mime_type("text/csv");
    assert!(matches!(
        ingest(&csv, &parser),
        Err(DataError::InvalidFormat { .. })
    ));
}

#[test]
fn test_rejected_upload_keeps_previous_dataset() {
    let mut app = business_app();
    app.upload(&xlsx_upload("first.xlsx", 1024)).unwrap();

    let result = app.upload(&xlsx_upload("second.csv", 1024));
    assert!(result.is_err());
    assert_eq!(app.file_name(), Some("first.xlsx"));
    assert_eq!(app.dataset(), Some(&business_dataset()));
    assert_eq!(app.bridge().list_files().len(), 1);
}

#[test]
fn test_controller_chart_and_limit_flow() {
    let mut app = business_app();
    app.upload(&xlsx_upload("business.xlsx", 2458)).unwrap();
    let columns = app.start_analysis().unwrap();
    assert_eq!(columns, app.column_options().unwrap());

    app.apply_limit_input("4 rows").unwrap();
    assert_eq!(app.preview_rows().len(), 4);

    app.select_chart_kind(ChartKind::Line);
    let chart = app.generate_chart("Month", "Profit").unwrap();
    assert_eq!(chart.series.kind, ChartKind::Line);
    assert_eq!(chart.series.y_values, vec![7000.0, 11000.0, 8500.0, 12000.0]);
    assert_eq!(chart.insights.summary.max_label, CellValue::text("April"));

    assert_eq!(app.counters().charts, 1);
    assert_eq!(app.counters().uploads, 1);
}
