//! Admin dashboard handlers - login, statistics and the file table

use super::state::AnalyticsApp;
use super::{AppError, AppResult};
use crate::admin::{FileSortOption, filter_files, sort_files};
use crate::notifications::Toast;
use crate::storage::{AdminStats, KeyValueStore, StoredFile};
use tracing::info;

impl<S: KeyValueStore> AnalyticsApp<S> {
    pub fn admin_login(&mut self, candidate: &str) -> AppResult<()> {
        match self.state.admin.session.login(candidate) {
            Ok(()) => {
                info!("Admin logged in");
                self.show_toast(Toast::success("Welcome to Admin Dashboard!"));
                Ok(())
            }
            Err(e) => {
                self.show_toast(Toast::error("Invalid password"));
                Err(e.into())
            }
        }
    }

    pub fn admin_logout(&mut self) {
        self.state.admin.session.logout();
        self.show_toast(Toast::info("Logged out successfully"));
    }

    pub fn is_admin(&self) -> bool {
        self.state.admin.session.is_logged_in()
    }

    /// Counters and storage usage (admin only)
    pub fn admin_stats(&mut self) -> AppResult<AdminStats> {
        self.require_admin()?;
        Ok(self.bridge.storage_stats())
    }

    /// Stored files matching `term`, in `sort` order (admin only)
    pub fn admin_files(&mut self, term: &str, sort: FileSortOption) -> AppResult<Vec<StoredFile>> {
        self.require_admin()?;
        let mut files = filter_files(&self.bridge.list_files(), term);
        sort_files(&mut files, sort);
        Ok(files)
    }

    /// One stored file, for the details dialog (admin only)
    pub fn file_details(&mut self, id: &str) -> AppResult<StoredFile> {
        self.require_admin()?;
        match self.bridge.find_file(id) {
            Some(file) => Ok(file),
            None => {
                self.show_toast(Toast::error("File not found"));
                Err(AppError::FileNotFound(id.to_string()))
            }
        }
    }
}
