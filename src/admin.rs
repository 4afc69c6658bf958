//! Admin view: shared-credential session, file listing helpers and the
//! file-details preview.
//!
//! The credential is a single static secret compared by SHA-256 digest. It
//! gates a view, nothing more.

use crate::storage::StoredFile;
use crate::types::Row;
use sha2::{Digest, Sha256};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    #[error("Invalid admin credentials")]
    InvalidCredential,
}

/// Hex SHA-256 of a credential
pub fn credential_digest(candidate: &str) -> String {
    Sha256::digest(candidate.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Login state of the admin view
#[derive(Clone, Debug)]
pub struct AdminSession {
    credential_sha256: String,
    logged_in: bool,
}

impl AdminSession {
    pub fn new(credential_sha256: impl Into<String>) -> Self {
        Self {
            credential_sha256: credential_sha256.into().to_ascii_lowercase(),
            logged_in: false,
        }
    }

    pub fn login(&mut self, candidate: &str) -> Result<(), AdminError> {
        if credential_digest(candidate) == self.credential_sha256 {
            self.logged_in = true;
            Ok(())
        } else {
            Err(AdminError::InvalidCredential)
        }
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }
}

/// Orderings offered by the admin file table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FileSortOption {
    #[default]
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
    SizeDesc,
    SizeAsc,
}

impl FromStr for FileSortOption {
    type Err = String;

    /// Parses the select values `date-desc`, `name-asc`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date-desc" => Ok(Self::DateDesc),
            "date-asc" => Ok(Self::DateAsc),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            "size-desc" => Ok(Self::SizeDesc),
            "size-asc" => Ok(Self::SizeAsc),
            other => Err(format!("Unknown sort option: {}", other)),
        }
    }
}

/// Files whose name contains `term` (case-insensitive) or whose id contains
/// it. An empty term keeps everything.
pub fn filter_files(files: &[StoredFile], term: &str) -> Vec<StoredFile> {
    let term = term.trim();
    if term.is_empty() {
        return files.to_vec();
    }
    let needle = term.to_lowercase();
    files
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&needle) || f.id.contains(term))
        .cloned()
        .collect()
}

/// Stable sort of the file list
pub fn sort_files(files: &mut [StoredFile], option: FileSortOption) {
    match option {
        FileSortOption::DateDesc => files.sort_by(|a, b| b.upload_date.cmp(&a.upload_date)),
        FileSortOption::DateAsc => files.sort_by(|a, b| a.upload_date.cmp(&b.upload_date)),
        FileSortOption::NameAsc => files.sort_by(|a, b| a.name.cmp(&b.name)),
        FileSortOption::NameDesc => files.sort_by(|a, b| b.name.cmp(&a.name)),
        FileSortOption::SizeDesc => files.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes)),
        FileSortOption::SizeAsc => files.sort_by(|a, b| a.size_bytes.cmp(&b.size_bytes)),
    }
}

/// Human-readable byte size
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Leading rows of a stored file, for the details dialog
pub fn file_preview(file: &StoredFile, rows: usize) -> &[Row] {
    let all = file.data.rows();
    &all[..rows.min(all.len())]
}
