pub mod extracted_file;
pub mod extraction;
pub mod file_identity;
pub mod license_evidence;
pub mod sbom_entry;
pub mod sbom_metadata;
pub mod scan_report;

pub use extracted_file::{
    Architecture, ExtractedFile, FileMetadata, FileStatus, FileType, UNEXPECTED_FILE_MESSAGE,
};
pub use extraction::{
    ExtractionError, ExtractionErrorCode, ExtractionStatus, ExtractionWorkspace, ExtractorTool,
};
pub use file_identity::{derive_file_id, normalize_install_path, FileId};
pub use license_evidence::{EvidenceIdSequence, EvidenceType, LicenseEvidence};
pub use sbom_entry::{
    ClassificationStatus, SbomEntry, NO_ASSERTION, README_LICENSE_REF, UNKNOWN_LICENSE,
};
pub use sbom_metadata::SbomMetadata;
pub use scan_report::{
    CoverageThresholds, ReportErrorCode, ScanCoverage, ScanReport, ScanReportError, ScanStatus,
};
