// src/storage/mod.rs
use crate::extractors::report::ReportItem;
use crate::utils::error::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes extracted report items as JSON files. This is the thin stand-in
/// for the pipeline collaborator; serialization and layout live here, never
/// in the extractor core.
pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves a report item to /base_dir/SYMBOL/SYMBOL_enddate_doctype.json
    pub fn save_report(&self, item: &ReportItem) -> Result<PathBuf, StorageError> {
        let symbol_dir = self.base_dir.join(item.symbol.replace([' ', '/'], "_"));
        if !symbol_dir.exists() {
            fs::create_dir_all(&symbol_dir).map_err(StorageError::IoError)?;
        }

        let filename = format!(
            "{}_{}_{}.json",
            item.symbol.replace([' ', '/'], "_"),
            item.end_date,
            item.doc_type
        );
        let file_path = symbol_dir.join(filename);

        let json = serde_json::to_string_pretty(item)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, json).map_err(StorageError::IoError)?;

        tracing::info!("Saved report to {}", file_path.display());

        Ok(file_path)
    }
}
