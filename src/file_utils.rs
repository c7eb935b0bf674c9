use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::document::DocumentFormat;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output file name for a translated document
    // @params: original_name, target_language, extension
    //
    // "report.docx" translated to "pt" becomes "report.pt.docx". A missing
    // or empty original name falls back to the stem "file".
    pub fn output_file_name(
        original_name: Option<&str>,
        target_language: &str,
        extension: &str,
    ) -> String {
        let stem = original_name
            .map(|name| Path::new(name))
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "file".to_string());
        format!("{}.{}.{}", stem, target_language, extension)
    }

    /// Persist an uploaded document under a collision-proof name
    ///
    /// The stored name is prefixed with a local timestamp so repeated
    /// uploads of the same file never overwrite each other.
    pub fn save_upload<P: AsRef<Path>>(dir: P, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        Self::ensure_dir(&dir)?;
        let stamp = Local::now().format("%Y%m%d%H%M%S%3f");
        let path = dir.as_ref().join(format!("{}_{}", stamp, file_name));
        fs::write(&path, bytes)
            .context(format!("Failed to save upload to {}", path.display()))?;
        Ok(path)
    }

    /// Write a generated document into the output directory
    pub fn save_output<P: AsRef<Path>>(dir: P, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        Self::ensure_dir(&dir)?;
        let path = dir.as_ref().join(file_name);
        fs::write(&path, bytes)
            .context(format!("Failed to write output to {}", path.display()))?;
        Ok(path)
    }

    /// Find translatable documents under a directory
    ///
    /// Recursively collects every file whose extension maps to a supported
    /// format, in a stable sorted order.
    pub fn find_documents<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let supported = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(DocumentFormat::from_extension)
                .is_some();
            if supported {
                result.push(path.to_path_buf());
            }
        }
        result.sort();
        Ok(result)
    }
}
