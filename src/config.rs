//! Application configuration.
//!
//! Stored as JSON under the platform config directory. Every field has a
//! default, so partial files work; a missing or malformed file yields the
//! defaults.

use crate::constants::{
    APP_DIR_NAME, DEFAULT_ADMIN_CREDENTIAL_SHA256, DEFAULT_PREVIEW_ROWS, DEFAULT_RECENT_FILES,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONFIG_FILE_NAME: &str = "config.json";
const STORE_FILE_NAME: &str = "store.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Rows shown in the data preview
    pub preview_rows: usize,
    /// Files listed on the home page
    pub recent_files: usize,
    /// Hex SHA-256 of the admin credential
    pub admin_credential_sha256: String,
    /// Key/value store file; defaults to [`default_storage_path`]
    pub storage_path: Option<PathBuf>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            recent_files: DEFAULT_RECENT_FILES,
            admin_credential_sha256: DEFAULT_ADMIN_CREDENTIAL_SHA256.to_string(),
            storage_path: None,
        }
    }
}

impl AnalyticsConfig {
    /// Load from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), "No config file, using defaults: {}", e);
                return Self::default();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), "Malformed config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Load from [`default_config_path`]
    pub fn load_default() -> Self {
        default_config_path()
            .map(|path| Self::load(&path))
            .unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// The configured store path, else the platform default
    pub fn resolved_storage_path(&self) -> Option<PathBuf> {
        self.storage_path.clone().or_else(default_storage_path)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

pub fn default_storage_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join(STORE_FILE_NAME))
}
