//! Persistence Workflow Integration Tests
//!
//! Uploads stored through the controller must survive a restart over the
//! same store file and come back as the same dataset.

use crate::helpers::{TestDatasetBuilder, app_parsing, business_dataset, xlsx_upload};
use chrono::{TimeZone, Utc};
use sheetlytics::app::AppError;
use sheetlytics::constants::{FILES_KEY, STATS_KEY};
use sheetlytics::storage::{FileStore, KeyValueStore, MemoryStore, PersistenceBridge};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> FileStore {
    FileStore::new(dir.path().join("store.json"))
}

#[test]
fn test_uploads_survive_restart() {
    let dir = TempDir::new().unwrap();
    let dataset = business_dataset();

    let stored_id = {
        let mut app = app_parsing(store_in(&dir), &dataset);
        let stored = app.upload(&xlsx_upload("business.xlsx", 2458)).unwrap().unwrap();
        assert_eq!(stored.rows, 6);
        assert_eq!(stored.columns, 5);
        assert_eq!(stored.size, "2.4 KB");
        stored.id
    };

    let mut reopened = app_parsing(store_in(&dir), &dataset);
    assert!(!reopened.has_data());
    assert_eq!(reopened.counters().uploads, 1);

    let columns = reopened.load_stored(&stored_id).unwrap();
    assert_eq!(columns, ["Month", "Sales", "Expenses", "Profit", "Region"]);
    assert_eq!(reopened.dataset(), Some(&dataset));
    assert_eq!(reopened.file_name(), Some("business.xlsx"));
}

#[test]
fn test_ids_stay_unique_across_instances() {
    let dir = TempDir::new().unwrap();
    let dataset = business_dataset();

    let mut first = app_parsing(store_in(&dir), &dataset);
    let a = first.upload(&xlsx_upload("a.xlsx", 10)).unwrap().unwrap();
    let b = first.upload(&xlsx_upload("b.xlsx", 10)).unwrap().unwrap();

    let mut second = app_parsing(store_in(&dir), &dataset);
    let c = second.upload(&xlsx_upload("c.xlsx", 10)).unwrap().unwrap();

    let ids: Vec<u64> = [&a, &b, &c].iter().map(|f| f.id.parse().unwrap()).collect();
    assert!(ids[0] < ids[1] && ids[1] < ids[2]);

    let recent: Vec<String> = second.recent_files().into_iter().map(|f| f.name).collect();
    assert_eq!(recent, ["c.xlsx", "b.xlsx", "a.xlsx"]);
}

#[test]
fn test_empty_cells_round_trip_through_store() {
    let dir = TempDir::new().unwrap();
    let dataset = TestDatasetBuilder::new(&["name", "score", "note"])
        .row(vec!["a".into(), 1.0.into(), "first".into()])
        .row(vec!["b".into(), 2.0.into(), sheetlytics::types::CellValue::Empty])
        .build();

    let mut bridge = PersistenceBridge::new(store_in(&dir));
    let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    let stored = bridge.save_file_at("scores.xlsx", 900, &dataset, at).unwrap();
    assert_eq!(stored.id, "1700000000000");

    let reloaded = PersistenceBridge::new(store_in(&dir));
    assert_eq!(reloaded.find_file(&stored.id).unwrap().data, dataset);
}

#[test]
fn test_malformed_store_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut bridge = PersistenceBridge::new(FileStore::new(&path));
    assert!(bridge.list_files().is_empty());
    assert_eq!(bridge.counters().uploads, 0);

    bridge.save_file("fresh.xlsx", 10, &business_dataset()).unwrap();
    assert_eq!(bridge.list_files().len(), 1);
}

#[test]
fn test_malformed_files_value_reads_as_empty() {
    let mut store = MemoryStore::new();
    store.set(FILES_KEY, "[{\"id\": 1".to_string()).unwrap();
    store.set(STATS_KEY, "{\"uploads\": 4}".to_string()).unwrap();

    let bridge = PersistenceBridge::new(store);
    assert!(bridge.list_files().is_empty());
    assert_eq!(bridge.counters().uploads, 4);
    assert_eq!(bridge.counters().charts, 0);
}

#[test]
fn test_delete_and_clear_as_admin() {
    let dir = TempDir::new().unwrap();
    let mut app = app_parsing(store_in(&dir), &business_dataset());
    let kept = app.upload(&xlsx_upload("kept.xlsx", 10)).unwrap().unwrap();
    let gone = app.upload(&xlsx_upload("gone.xlsx", 10)).unwrap().unwrap();

    assert!(matches!(app.delete_file(&gone.id), Err(AppError::AdminRequired)));
    app.admin_login("Admin123").unwrap();

    assert!(app.delete_file(&gone.id).unwrap());
    assert!(!app.delete_file("no-such-id").unwrap());
    let names: Vec<String> = app.bridge().list_files().into_iter().map(|f| f.name).collect();
    assert_eq!(names, [kept.name.clone()]);

    app.clear_all().unwrap();
    assert!(app.bridge().list_files().is_empty());
    assert_eq!(app.counters().uploads, 0);
    assert!(!dir.path().join("store.json").exists());
    assert!(app.has_data());
}

#[test]
fn test_counters_follow_the_workflow() {
    let mut app = app_parsing(MemoryStore::new(), &business_dataset());
    app.upload(&xlsx_upload("business.xlsx", 2458)).unwrap();
    app.start_analysis().unwrap();
    app.generate_chart("Month", "Sales").unwrap();
    app.generate_chart("Month", "Expenses").unwrap();

    let counters = app.counters();
    assert_eq!((counters.uploads, counters.charts, counters.downloads), (1, 2, 0));
}
