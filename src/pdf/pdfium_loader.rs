//! PDFium library loader with platform-specific search paths.

use pdfium_render::prelude::*;
use std::path::PathBuf;

pub struct PdfiumLoader;

impl PdfiumLoader {
    /// Load the PDFium library from known search paths or the system library.
    ///
    /// Search order:
    /// 1. `$SHEETLYTICS_PDFIUM_DIR`
    /// 2. `lib/` in the current working directory
    /// 3. `lib/` next to the executable
    /// 4. System library fallback
    pub fn load() -> Result<Pdfium, String> {
        for path in Self::search_paths() {
            if !path.exists() {
                continue;
            }
            match Pdfium::bind_to_library(&path) {
                Ok(bindings) => return Ok(Pdfium::new(bindings)),
                Err(e) => tracing::debug!(path = %path.display(), "Skipping pdfium candidate: {:?}", e),
            }
        }
        Pdfium::bind_to_system_library()
            .map(Pdfium::new)
            .map_err(|e| format!("Failed to load pdfium: {:?}", e))
    }

    fn search_paths() -> Vec<PathBuf> {
        let lib_name = Pdfium::pdfium_platform_library_name();
        let mut paths = Vec::new();

        if let Some(dir) = std::env::var_os("SHEETLYTICS_PDFIUM_DIR") {
            paths.push(PathBuf::from(dir).join(&lib_name));
        }

        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join("lib").join(&lib_name));
        }

        if let Ok(exe) = std::env::current_exe() {
            if let Some(parent) = exe.parent() {
                paths.push(parent.join("lib").join(&lib_name));
            }
        }

        paths
    }
}
