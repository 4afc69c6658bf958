//! Admin Workflow Integration Tests

use crate::helpers::{TestDatasetBuilder, app_parsing, assert_close, business_app, xlsx_upload};
use sheetlytics::admin::{FileSortOption, file_preview};
use sheetlytics::app::{AppError, Page};
use sheetlytics::constants::FILE_DETAILS_PREVIEW_ROWS;
use sheetlytics::storage::MemoryStore;

#[test]
fn test_admin_dashboard_flow() {
    let mut app = business_app();
    app.upload(&xlsx_upload("Q1 Sales.xlsx", 4096)).unwrap();
    app.upload(&xlsx_upload("costs.xls", 1024)).unwrap();
    app.upload(&xlsx_upload("q2 sales.xlsx", 2048)).unwrap();

    assert!(matches!(
        app.admin_files("", FileSortOption::default()),
        Err(AppError::AdminRequired)
    ));
    assert!(app.admin_login("admin").is_err());
    assert_eq!(
        app.toasts().latest().map(|t| t.message.as_str()),
        Some("Invalid password")
    );

    app.toasts_mut().clear();
    app.admin_login("Admin123").unwrap();
    assert_eq!(app.toasts().count(), 1);
    app.navigate(Page::Admin);
    assert_eq!(app.page(), Page::Admin);

    let largest_first: Vec<String> = app
        .admin_files("", FileSortOption::SizeDesc)
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(largest_first, ["Q1 Sales.xlsx", "q2 sales.xlsx", "costs.xls"]);

    let sales: Vec<String> = app
        .admin_files("SALES", FileSortOption::SizeAsc)
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(sales, ["q2 sales.xlsx", "Q1 Sales.xlsx"]);

    let stats = app.admin_stats().unwrap();
    assert_eq!(stats.uploads, 3);
    assert!(stats.storage_used_mb > 0.0);
}

#[test]
fn test_file_details_preview() {
    let dataset = TestDatasetBuilder::new(&["item", "qty"])
        .with_numbered_rows(12)
        .build();
    let mut app = app_parsing(MemoryStore::new(), &dataset);
    let stored = app.upload(&xlsx_upload("items.xlsx", 512)).unwrap().unwrap();
    app.admin_login("Admin123").unwrap();

    let details = app.file_details(&stored.id).unwrap();
    assert_eq!(details.rows, 12);
    let preview = file_preview(&details, FILE_DETAILS_PREVIEW_ROWS);
    assert_eq!(preview.len(), FILE_DETAILS_PREVIEW_ROWS.min(12));
    assert_eq!(preview[0], dataset.rows()[0]);

    assert!(matches!(
        app.file_details("missing"),
        Err(AppError::FileNotFound(id)) if id == "missing"
    ));
}

#[test]
fn test_storage_stats_match_serialized_files() {
    let mut app = business_app();
    app.upload(&xlsx_upload("business.xlsx", 2458)).unwrap();
    app.admin_login("Admin123").unwrap();

    let json = serde_json::to_string(&app.bridge().list_files()).unwrap();
    let stats = app.admin_stats().unwrap();
    assert_close(stats.storage_used_mb, json.len() as f64 / (1024.0 * 1024.0));
}
