use crate::sbom_generation::domain::{ExtractionError, ExtractorTool};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// Everything a backend needs to unpack one installer
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub installer: PathBuf,
    pub workdir: PathBuf,
    pub timeout: Duration,
}

/// Captured output of a successful extractor run
#[derive(Debug, Clone, Default)]
pub struct ExtractOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Extractor port for installer unpacking backends
///
/// Implementations wrap an external tool that writes the installer's
/// payload below `ExtractRequest::workdir`.
///
/// # Async Support
/// `extract` is async so the caller can bound it with a timeout.
/// Implementations must be `Send + Sync`.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Which tool this backend drives
    fn tool(&self) -> ExtractorTool;

    /// Whether the backend's executable could be located
    fn is_available(&self) -> bool;

    /// Runs the tool against the installer
    ///
    /// # Errors
    /// Returns a classified `ExtractionError` when the tool cannot be
    /// started, exits unsuccessfully, or exceeds the timeout.
    async fn extract(&self, request: &ExtractRequest) -> Result<ExtractOutput, ExtractionError>;

    /// Maps raw tool output to a classified error
    fn map_error(&self, output: &str) -> ExtractionError {
        ExtractionError::from_failure_text(output)
    }
}
