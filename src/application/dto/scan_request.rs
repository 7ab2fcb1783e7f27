use super::SbomFormat;
use crate::sbom_generation::domain::CoverageThresholds;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

/// Default hard limit for one extractor run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(900);

/// ScanRequest - Internal request DTO for the scan use case
///
/// Built by the CLI from flags and the optional config file.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Installer to scan
    pub installer: PathBuf,
    /// Receives the SBOM documents, `scan-status.json`, and the workspace
    pub output_dir: PathBuf,
    pub formats: Vec<SbomFormat>,
    /// Record a classification gap when unexpected files are found
    pub fail_on_unsupported: bool,
    /// Keep `<output_dir>/workspace` after the run
    pub retain_workspace: bool,
    pub timeout: Duration,
    /// Allow-list of normalized install paths
    pub expected_paths: Option<HashSet<String>>,
    pub coverage_thresholds: CoverageThresholds,
}

impl ScanRequest {
    /// Request with default options
    pub fn new(installer: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            installer,
            output_dir,
            formats: SbomFormat::ALL.to_vec(),
            fail_on_unsupported: false,
            retain_workspace: false,
            timeout: DEFAULT_TIMEOUT,
            expected_paths: None,
            coverage_thresholds: CoverageThresholds::default(),
        }
    }

    pub fn workspace_dir(&self) -> PathBuf {
        self.output_dir.join("workspace")
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join("scan-status.json")
    }

    /// Installer file name, used as job id and document name
    pub fn job_id(&self) -> String {
        self.installer
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.installer.display().to_string())
    }
}
