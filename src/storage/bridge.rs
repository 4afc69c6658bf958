//! Persistence bridge
//!
//! Stores ingested datasets as [`StoredFile`] records under [`FILES_KEY`]
//! and the usage counters under [`STATS_KEY`]. Every change rewrites the
//! whole value for its key.

use super::{KeyValueStore, StorageResult};
use crate::constants::{FILES_KEY, STATS_KEY};
use crate::types::Dataset;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// A persisted snapshot of one ingested dataset
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Unix-millis timestamp string, unique within the store
    pub id: String,
    pub name: String,
    /// Display size, e.g. `"12.3 KB"`
    pub size: String,
    #[serde(default)]
    pub size_bytes: u64,
    pub upload_date: DateTime<Utc>,
    pub rows: usize,
    pub columns: usize,
    pub data: Dataset,
}

/// Usage counters, reset only by [`PersistenceBridge::clear_all`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageCounters {
    pub uploads: u64,
    pub charts: u64,
    pub downloads: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterKind {
    Uploads,
    Charts,
    Downloads,
}

impl UsageCounters {
    fn bump(&mut self, kind: CounterKind) {
        let counter = match kind {
            CounterKind::Uploads => &mut self.uploads,
            CounterKind::Charts => &mut self.charts,
            CounterKind::Downloads => &mut self.downloads,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Figures shown on the admin dashboard
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AdminStats {
    pub uploads: u64,
    pub charts: u64,
    pub downloads: u64,
    /// Size of the serialized file list in MiB
    pub storage_used_mb: f64,
}

/// Display size label stored with each file
pub fn size_label(size_bytes: u64) -> String {
    format!("{:.1} KB", size_bytes as f64 / 1024.0)
}

/// Stored files and usage counters over a [`KeyValueStore`]
#[derive(Debug)]
pub struct PersistenceBridge<S: KeyValueStore> {
    store: S,
    last_id: u64,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(store: S) -> Self {
        Self { store, last_id: 0 }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read a persisted JSON value; absent, unreadable or malformed values
    /// yield `None`
    fn read_value(&self, key: &str) -> Option<Value> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, "Failed to read persisted value: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, "Malformed persisted value, treating as empty: {}", e);
                None
            }
        }
    }

    /// Decode a value that must be a JSON object
    fn read_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.read_value(key)?;
        if !value.is_object() {
            warn!(key, "Persisted value is not an object, treating as empty");
            return None;
        }
        decode(key, value)
    }

    /// Decode a value that must be a JSON array of objects
    fn read_record_list<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let value = self.read_value(key)?;
        let well_formed = value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_object));
        if !well_formed {
            warn!(key, "Persisted value is not a list of objects, treating as empty");
            return None;
        }
        decode(key, value)
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StorageResult<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, json)
    }

    /// Every stored file in upload order
    pub fn list_files(&self) -> Vec<StoredFile> {
        self.read_record_list(FILES_KEY).unwrap_or_default()
    }

    pub fn find_file(&self, id: &str) -> Option<StoredFile> {
        self.list_files().into_iter().find(|f| f.id == id)
    }

    /// The `n` most recently uploaded files, newest first
    pub fn recent_files(&self, n: usize) -> Vec<StoredFile> {
        let mut files = self.list_files();
        files.reverse();
        files.truncate(n);
        files
    }

    /// Persist a dataset as a new file and count the upload
    pub fn save_file(
        &mut self,
        name: &str,
        size_bytes: u64,
        dataset: &Dataset,
    ) -> StorageResult<StoredFile> {
        self.save_file_at(name, size_bytes, dataset, Utc::now())
    }

    /// [`save_file`](Self::save_file) with an explicit upload time
    pub fn save_file_at(
        &mut self,
        name: &str,
        size_bytes: u64,
        dataset: &Dataset,
        at: DateTime<Utc>,
    ) -> StorageResult<StoredFile> {
        let mut files = self.list_files();
        let id = self.next_id(&files, at);

        let file = StoredFile {
            id: id.to_string(),
            name: name.to_string(),
            size: size_label(size_bytes),
            size_bytes,
            upload_date: at,
            rows: dataset.row_count(),
            columns: dataset.column_count(),
            data: dataset.clone(),
        };
        files.push(file.clone());
        self.write_json(FILES_KEY, &files)?;
        self.last_id = id;
        debug!(id = %file.id, name, rows = file.rows, "Stored file");

        if let Err(e) = self.increment_counter(CounterKind::Uploads) {
            warn!(id = %file.id, "Failed to count upload: {}", e);
        }
        Ok(file)
    }

    /// Time-based id, bumped past the newest id already issued or stored
    fn next_id(&self, files: &[StoredFile], at: DateTime<Utc>) -> u64 {
        let stored_max = files
            .iter()
            .filter_map(|f| f.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let last = self.last_id.max(stored_max);
        let now = u64::try_from(at.timestamp_millis()).unwrap_or(0);
        if now > last { now } else { last + 1 }
    }

    /// Remove a file by id. Unknown ids are a no-op; returns whether a file
    /// was removed.
    pub fn delete_file(&mut self, id: &str) -> StorageResult<bool> {
        let mut files = self.list_files();
        let before = files.len();
        files.retain(|f| f.id != id);
        if files.len() == before {
            debug!(id, "Delete requested for unknown file");
            return Ok(false);
        }
        self.write_json(FILES_KEY, &files)?;
        Ok(true)
    }

    /// Wipe the namespace: files and counters
    pub fn clear_all(&mut self) -> StorageResult<()> {
        self.store.clear()?;
        self.last_id = 0;
        Ok(())
    }

    pub fn counters(&self) -> UsageCounters {
        self.read_record(STATS_KEY).unwrap_or_default()
    }

    /// Read-modify-write one counter and return the updated record
    pub fn increment_counter(&mut self, kind: CounterKind) -> StorageResult<UsageCounters> {
        let mut counters = self.counters();
        counters.bump(kind);
        self.write_json(STATS_KEY, &counters)?;
        Ok(counters)
    }

    pub fn storage_stats(&self) -> AdminStats {
        let counters = self.counters();
        let stored_bytes = serde_json::to_string(&self.list_files())
            .map(|json| json.len())
            .unwrap_or(0);
        AdminStats {
            uploads: counters.uploads,
            charts: counters.charts,
            downloads: counters.downloads,
            storage_used_mb: stored_bytes as f64 / (1024.0 * 1024.0),
        }
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(key, "Malformed persisted value, treating as empty: {}", e);
            None
        }
    }
}
