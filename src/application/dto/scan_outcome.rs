use crate::sbom_generation::domain::ScanReport;
use crate::shared::error::ExitCode;
use std::path::PathBuf;

/// ScanOutcome - Result DTO of one scan run
///
/// Returned for completed and failed runs alike; the report has already
/// been written to `report_path` when this is produced.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub report: ScanReport,
    pub report_path: PathBuf,
    pub exit_code: ExitCode,
}

impl ScanOutcome {
    pub fn is_success(&self) -> bool {
        self.exit_code == ExitCode::Success
    }
}
