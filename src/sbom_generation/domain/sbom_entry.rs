use super::{Architecture, ExtractedFile, FileId, FileType};
use serde::Serialize;

/// License value used when nothing supports a conclusion
pub const NO_ASSERTION: &str = "NOASSERTION";

/// License value used when only a README was found
pub const README_LICENSE_REF: &str = "LicenseRef-Readme";

/// Placeholder license before inference runs; CycloneDX omits it entirely
pub const UNKNOWN_LICENSE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationStatus {
    Classified,
    ManualReviewRequired,
}

impl ClassificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationStatus::Classified => "classified",
            ClassificationStatus::ManualReviewRequired => "manual_review_required",
        }
    }
}

/// Per-file projection consumed by the SBOM formatters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SbomEntry {
    pub file_id: FileId,
    pub path: String,
    pub checksum: String,
    pub file_type: FileType,
    pub license: String,
    pub evidence_ids: Vec<String>,
    pub classification_status: ClassificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<Architecture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl SbomEntry {
    /// Entry for a file whose license has not been inferred yet
    pub fn unlicensed(file: &ExtractedFile) -> Self {
        Self {
            file_id: file.id.clone(),
            path: file.install_path.clone(),
            checksum: file.checksum.clone(),
            file_type: file.file_type,
            license: UNKNOWN_LICENSE.to_string(),
            evidence_ids: Vec::new(),
            classification_status: ClassificationStatus::ManualReviewRequired,
            architecture: Some(file.architecture),
            language: Some(file.language.clone()),
        }
    }
}
