use crate::ports::outbound::WorkspaceReader;
use crate::shared::error::SbomError;
use crate::shared::security::{validate_regular_file, within_size_limit};
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// WorkspaceFileReader adapter for reading the extraction workspace
///
/// Symbolic links inside the workspace are never followed: an installer
/// must not be able to point the scanner at files outside its own payload.
pub struct WorkspaceFileReader;

impl WorkspaceFileReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WorkspaceFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceReader for WorkspaceFileReader {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry =
                entry.with_context(|| format!("Failed to walk workspace {}", root.display()))?;

            if entry.path_is_symlink() {
                tracing::warn!(path = %entry.path().display(), "skipping symbolic link in workspace");
            } else if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn read_text_prefix(&self, path: &Path, max_bytes: u64) -> Result<Option<String>> {
        validate_regular_file(path, "evidence file")?;

        let size = fs::metadata(path)
            .map_err(|e| read_error(path, e))?
            .len();
        if !within_size_limit(size, max_bytes) {
            tracing::debug!(path = %path.display(), size, "evidence file above read ceiling");
            return Ok(None);
        }

        let bytes = fs::read(path).map_err(|e| read_error(path, e))?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

fn read_error(path: &Path, error: std::io::Error) -> SbomError {
    SbomError::FileReadError {
        path: path.to_path_buf(),
        details: error.to_string(),
    }
}
