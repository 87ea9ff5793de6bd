//! Document reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads documents to tag
pub struct FileReader;

impl FileReader {
    /// Read a document as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read document: {}", path.display()))
    }

    /// Total size in bytes of a set of documents
    pub fn total_size(paths: &[impl AsRef<Path>]) -> Result<u64> {
        paths.iter().try_fold(0u64, |total, path| {
            let path = path.as_ref();
            let metadata = fs::metadata(path)
                .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;
            Ok(total + metadata.len())
        })
    }
}
