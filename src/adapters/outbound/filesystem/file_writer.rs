use crate::ports::outbound::ArtifactWriter;
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemWriter adapter for writing scan artifacts to disk
pub struct FileSystemWriter;

impl FileSystemWriter {
    pub fn new() -> Self {
        Self
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() && parent != Path::new("") {
                return Err(SbomError::FileWriteError {
                    path: path.to_path_buf(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Rejects writing through an existing symbolic link
    fn validate_output_security(path: &Path) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(path) {
            if metadata.is_symlink() {
                return Err(SbomError::FileWriteError {
                    path: path.to_path_buf(),
                    details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Default for FileSystemWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtifactWriter for FileSystemWriter {
    fn write_artifact(&self, path: &Path, content: &str) -> Result<()> {
        Self::validate_parent_directory(path)?;
        Self::validate_output_security(path)?;

        fs::write(path, content).map_err(|e| SbomError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), bytes = content.len(), "artifact written");
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| {
            SbomError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Failed to create directory: {}", e),
            }
            .into()
        })
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "directory removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SbomError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Failed to remove directory: {}", e),
            }
            .into()),
        }
    }
}
