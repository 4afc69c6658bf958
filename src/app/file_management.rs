//! File management - uploads, the sample dataset and stored files

use super::state::AnalyticsApp;
use super::{AppError, AppResult, Page};
use crate::data::{UploadedFile, ingest};
use crate::notifications::Toast;
use crate::storage::{KeyValueStore, StoredFile};
use crate::types::{CellValue, Dataset, Row};
use tracing::{info, warn};

/// Display name of the built-in demo dataset
pub const SAMPLE_FILE_NAME: &str = "Sample_Business_Data.xlsx";

/// Six months of demo business figures
pub fn sample_dataset() -> Dataset {
    let rows = [
        ("January", 25000.0, 18000.0, 7000.0, "North"),
        ("February", 32000.0, 21000.0, 11000.0, "South"),
        ("March", 28000.0, 19500.0, 8500.0, "East"),
        ("April", 35000.0, 23000.0, 12000.0, "West"),
        ("May", 42000.0, 28000.0, 14000.0, "North"),
        ("June", 38000.0, 25000.0, 13000.0, "South"),
    ];
    Dataset::new(
        ["Month", "Sales", "Expenses", "Profit", "Region"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        rows.iter()
            .map(|&(month, sales, expenses, profit, region)| {
                Row::new(vec![
                    CellValue::text(month),
                    CellValue::Number(sales),
                    CellValue::Number(expenses),
                    CellValue::Number(profit),
                    CellValue::text(region),
                ])
            })
            .collect(),
    )
}

impl<S: KeyValueStore> AnalyticsApp<S> {
    /// Ingest an uploaded file, make it the active dataset and store it.
    ///
    /// A rejected file leaves the current dataset in place. A dataset that
    /// parses but cannot be stored stays active for the session; the stored
    /// record is `None` in that case.
    pub fn upload(&mut self, file: &UploadedFile) -> AppResult<Option<StoredFile>> {
        let parser = self.parser.as_ref();
        let result = self.state.perf.time("ingest", || ingest(file, parser));
        let dataset = match result {
            Ok(dataset) => dataset,
            Err(e) => {
                self.show_toast(Toast::error(e.to_string()));
                return Err(e.into());
            }
        };

        info!(
            name = %file.name,
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "File processed"
        );
        let stored = match self.bridge.save_file(&file.name, file.size_bytes, &dataset) {
            Ok(stored) => Some(stored),
            Err(e) => {
                warn!(name = %file.name, "Failed to store upload: {}", e);
                self.show_toast(Toast::error(format!("Could not save {}: {}", file.name, e)));
                None
            }
        };

        self.state.analysis.activate(dataset, file.name.clone());
        self.show_toast(Toast::success("File processed successfully!"));
        Ok(stored)
    }

    /// Activate the demo dataset. It is never stored.
    pub fn load_sample(&mut self) {
        self.state
            .analysis
            .activate(sample_dataset(), SAMPLE_FILE_NAME.to_string());
        self.show_toast(Toast::success("Sample data loaded successfully!"));
    }

    /// Activate a stored file and open the analysis page
    pub fn load_stored(&mut self, id: &str) -> AppResult<Vec<String>> {
        let Some(file) = self.bridge.find_file(id) else {
            self.show_toast(Toast::error("File not found"));
            return Err(AppError::FileNotFound(id.to_string()));
        };
        let name = file.name.clone();
        self.state.analysis.activate(file.data, name.clone());
        let columns = self.start_analysis()?;
        self.show_toast(Toast::success(format!("Loaded {} for analysis", name)));
        Ok(columns)
    }

    /// Delete a stored file (admin only). Unknown ids are a no-op.
    pub fn delete_file(&mut self, id: &str) -> AppResult<bool> {
        self.require_admin()?;
        match self.bridge.delete_file(id) {
            Ok(removed) => {
                if removed {
                    self.show_toast(Toast::success("File deleted successfully"));
                }
                Ok(removed)
            }
            Err(e) => {
                self.show_toast(Toast::error(format!("Failed to delete file: {}", e)));
                Err(e.into())
            }
        }
    }

    /// Wipe every stored file and counter (admin only).
    ///
    /// The active session dataset is kept.
    pub fn clear_all(&mut self) -> AppResult<()> {
        self.require_admin()?;
        if let Err(e) = self.bridge.clear_all() {
            self.show_toast(Toast::error(format!("Failed to clear data: {}", e)));
            return Err(e.into());
        }
        self.show_toast(Toast::success("All data cleared successfully"));
        Ok(())
    }

    pub(crate) fn require_admin(&mut self) -> AppResult<()> {
        if self.state.admin.session.is_logged_in() {
            Ok(())
        } else {
            self.show_toast(Toast::error("Admin login required"));
            Err(AppError::AdminRequired)
        }
    }

    /// Navigate to a page
    pub fn navigate(&mut self, page: Page) {
        self.state.navigation.page = page;
    }
}
