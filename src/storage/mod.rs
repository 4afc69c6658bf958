//! Key/value persistence.
//!
//! - `backends` - in-memory and JSON-file [`KeyValueStore`] implementations
//! - `bridge` - stored files and usage counters on top of a store
//!
//! Persistence is best-effort: missing or malformed values read back as
//! empty state and are only logged.

mod backends;
mod bridge;

pub use backends::{FileStore, MemoryStore};
pub use bridge::*;

use thiserror::Error;

/// Errors raised by a key/value backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// String key/value store holding JSON-encoded values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
    /// Remove every key in the namespace
    fn clear(&mut self) -> StorageResult<()>;
}
