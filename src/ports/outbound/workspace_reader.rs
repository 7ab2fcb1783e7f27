use crate::shared::Result;
use std::path::{Path, PathBuf};

/// WorkspaceReader port for walking and sampling the extraction workspace
pub trait WorkspaceReader {
    /// Lists every regular file below `root`, sorted by path
    ///
    /// Symbolic links are skipped rather than followed.
    ///
    /// # Errors
    /// Returns an error if `root` cannot be traversed.
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Reads a file as lossy UTF-8 when it is smaller than `max_bytes`
    ///
    /// Returns `Ok(None)` for files at or above the ceiling.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_text_prefix(&self, path: &Path, max_bytes: u64) -> Result<Option<String>>;
}
