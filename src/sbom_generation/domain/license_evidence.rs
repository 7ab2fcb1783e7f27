use super::FileId;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
    Readme,
    LicenseFile,
    ResourceString,
    BinaryMetadata,
}

/// A file that supports inferring a license for itself or its neighbours
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseEvidence {
    pub id: String,
    pub source_file_id: FileId,
    pub evidence_type: EvidenceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_spdx_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    pub confidence: f64,
    pub summary: String,
}

/// Hands out `evidence-1`, `evidence-2`, ... for a single collection run
#[derive(Debug, Default)]
pub struct EvidenceIdSequence {
    last: u64,
}

impl EvidenceIdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.last += 1;
        format!("evidence-{}", self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic_and_scoped() {
        let mut first = EvidenceIdSequence::new();
        assert_eq!(first.next_id(), "evidence-1");
        assert_eq!(first.next_id(), "evidence-2");

        let mut second = EvidenceIdSequence::new();
        assert_eq!(second.next_id(), "evidence-1");
    }

    #[test]
    fn test_evidence_type_serialization() {
        assert_eq!(
            serde_json::to_value(EvidenceType::LicenseFile).unwrap(),
            "license_file"
        );
        assert_eq!(serde_json::to_value(EvidenceType::Readme).unwrap(), "readme");
    }
}
