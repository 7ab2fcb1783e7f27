use crate::shared::Result;
use std::path::Path;

/// ArtifactWriter port for everything a scan writes to disk
///
/// Covers the SBOM documents, the scan report, and the lifecycle of the
/// extraction workspace directory.
pub trait ArtifactWriter {
    /// Writes `content` to `path`, replacing any previous file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The parent directory does not exist
    /// - The target is a symbolic link
    /// - The write itself fails
    fn write_artifact(&self, path: &Path, content: &str) -> Result<()>;

    /// Creates `path` and any missing parents
    fn create_dir(&self, path: &Path) -> Result<()>;

    /// Removes `path` recursively; a missing directory is not an error
    fn remove_dir(&self, path: &Path) -> Result<()>;
}
