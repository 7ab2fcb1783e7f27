//! The status artifact of one scan run (`scan-status.json`).

use super::{ExtractionError, ExtractionErrorCode, ExtractorTool, FileId};
use crate::shared::error::ExitCode;
use crate::shared::Result;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Pipeline stages, in the only order they may be visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Pending,
    Extracting,
    Classifying,
    SbomEmitting,
    Completed,
    Failed,
}

impl ScanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanStatus::Pending => "pending",
            ScanStatus::Extracting => "extracting",
            ScanStatus::Classifying => "classifying",
            ScanStatus::SbomEmitting => "sbom_emitting",
            ScanStatus::Completed => "completed",
            ScanStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanStatus::Completed | ScanStatus::Failed)
    }

    /// Whether `next` directly follows `self`
    ///
    /// Any non-terminal stage may fail; otherwise stages advance one step at a time.
    pub fn can_advance_to(&self, next: ScanStatus) -> bool {
        use ScanStatus::*;
        match (self, next) {
            (current, Failed) => !current.is_terminal(),
            (Pending, Extracting)
            | (Extracting, Classifying)
            | (Classifying, SbomEmitting)
            | (SbomEmitting, Completed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable codes recorded in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportErrorCode {
    UnsupportedCompression,
    MissingSegment,
    PasswordProtected,
    Corrupted,
    Timeout,
    Unknown,
    SbomValidationFailed,
    ClassificationGap,
    CoverageBelowThreshold,
    ScanFailed,
}

impl From<ExtractionErrorCode> for ReportErrorCode {
    fn from(code: ExtractionErrorCode) -> Self {
        match code {
            ExtractionErrorCode::UnsupportedCompression => ReportErrorCode::UnsupportedCompression,
            ExtractionErrorCode::MissingSegment => ReportErrorCode::MissingSegment,
            ExtractionErrorCode::PasswordProtected => ReportErrorCode::PasswordProtected,
            ExtractionErrorCode::Corrupted => ReportErrorCode::Corrupted,
            ExtractionErrorCode::Timeout => ReportErrorCode::Timeout,
            ExtractionErrorCode::Unknown => ReportErrorCode::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReportError {
    pub code: ReportErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<FileId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

impl From<&ExtractionError> for ScanReportError {
    fn from(error: &ExtractionError) -> Self {
        Self {
            code: error.code.into(),
            message: error.message.clone(),
            file_id: None,
            segment: error.segment.clone(),
        }
    }
}

/// Binary (0 or 100) coverage per stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanCoverage {
    pub extracted: u8,
    pub classified: u8,
    pub metadata_complete: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageThresholds {
    pub extracted: u8,
    pub classified: u8,
    pub metadata_complete: u8,
}

impl Default for CoverageThresholds {
    fn default() -> Self {
        Self {
            extracted: 100,
            classified: 100,
            metadata_complete: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SbomPaths {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spdx_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyclonedx_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanTimings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classify_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emit_seconds: Option<f64>,
}

/// Top-level record of one scan; written by the scan driver only
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub job_id: String,
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    pub status: ScanStatus,
    pub errors: Vec<ScanReportError>,
    pub coverage: ScanCoverage,
    pub coverage_thresholds: CoverageThresholds,
    pub sbom: SbomPaths,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractor: Option<ExtractorTool>,
    pub timings: ScanTimings,
}

impl ScanReport {
    pub fn new(job_id: String, started_at: String, thresholds: CoverageThresholds) -> Self {
        Self {
            job_id,
            started_at,
            completed_at: None,
            status: ScanStatus::Pending,
            errors: Vec::new(),
            coverage: ScanCoverage::default(),
            coverage_thresholds: thresholds,
            sbom: SbomPaths::default(),
            extractor: None,
            timings: ScanTimings::default(),
        }
    }

    /// Moves the report to the next stage
    ///
    /// # Errors
    /// Returns an error when the transition would skip or re-enter a stage
    pub fn advance(&mut self, next: ScanStatus) -> Result<()> {
        if !self.status.can_advance_to(next) {
            anyhow::bail!(
                "Invalid scan status transition: {} -> {}",
                self.status,
                next
            );
        }
        self.status = next;
        Ok(())
    }

    pub fn record_error(&mut self, code: ReportErrorCode, message: impl Into<String>) {
        self.errors.push(ScanReportError {
            code,
            message: message.into(),
            file_id: None,
            segment: None,
        });
    }

    /// Sets every coverage counter to 100 when any file was found, else 0
    pub fn update_coverage(&mut self, file_count: usize) {
        let value = if file_count == 0 { 0 } else { 100 };
        self.coverage = ScanCoverage {
            extracted: value,
            classified: value,
            metadata_complete: value,
        };
    }

    pub fn coverage_below_threshold(&self) -> bool {
        let c = &self.coverage;
        let t = &self.coverage_thresholds;
        c.extracted < t.extracted
            || c.classified < t.classified
            || c.metadata_complete < t.metadata_complete
    }

    pub fn has_error(&self, code: ReportErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Exit code for a report that reached `completed`
    pub fn completed_exit_code(&self) -> ExitCode {
        if self.has_error(ReportErrorCode::SbomValidationFailed) {
            ExitCode::EmissionFailed
        } else if self.errors.is_empty() {
            ExitCode::Success
        } else {
            ExitCode::ClassificationGap
        }
    }
}
