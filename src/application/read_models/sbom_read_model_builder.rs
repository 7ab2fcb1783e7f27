//! Builder for constructing SbomReadModel from domain objects

use super::component_view::{ComponentView, EvidenceView};
use super::sbom_read_model::{SbomMetadataView, SbomReadModel};
use crate::sbom_generation::domain::{
    EvidenceType, LicenseEvidence, SbomEntry, SbomMetadata,
};

/// Builder for constructing SbomReadModel from domain objects
pub struct SbomReadModelBuilder;

impl SbomReadModelBuilder {
    /// Builds a SbomReadModel from the licensed entries and their evidence
    ///
    /// Components are ordered by path so output does not depend on the
    /// order in which files were discovered.
    pub fn build(
        entries: &[SbomEntry],
        evidence: &[LicenseEvidence],
        metadata: &SbomMetadata,
    ) -> SbomReadModel {
        let mut components: Vec<ComponentView> = entries.iter().map(Self::build_component).collect();
        components.sort_by(|a, b| a.path.cmp(&b.path));

        SbomReadModel {
            metadata: Self::build_metadata(metadata),
            components,
            evidence: evidence.iter().map(Self::build_evidence).collect(),
        }
    }

    fn build_metadata(metadata: &SbomMetadata) -> SbomMetadataView {
        SbomMetadataView {
            timestamp: metadata.timestamp().to_string(),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
            document_name: metadata.document_name().to_string(),
            serial_number: metadata.serial_number().to_string(),
            document_namespace: metadata.document_namespace().to_string(),
        }
    }

    fn build_component(entry: &SbomEntry) -> ComponentView {
        ComponentView {
            file_id: entry.file_id.to_string(),
            path: entry.path.clone(),
            sha256_hash: entry.checksum.clone(),
            file_type: entry.file_type.as_str().to_string(),
            license: entry.license.clone(),
            classification_status: entry.classification_status.as_str().to_string(),
            architecture: entry.architecture.map(|a| a.as_str().to_string()),
            language: entry.language.clone(),
            evidence_ids: entry.evidence_ids.clone(),
        }
    }

    fn build_evidence(evidence: &LicenseEvidence) -> EvidenceView {
        let evidence_type = match evidence.evidence_type {
            EvidenceType::Readme => "readme",
            EvidenceType::LicenseFile => "license_file",
            EvidenceType::ResourceString => "resource_string",
            EvidenceType::BinaryMetadata => "binary_metadata",
        };
        EvidenceView {
            id: evidence.id.clone(),
            source_file_id: evidence.source_file_id.to_string(),
            evidence_type: evidence_type.to_string(),
            license_spdx_id: evidence.license_spdx_id.clone(),
            summary: evidence.summary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::{ClassificationStatus, ExtractedFile, NO_ASSERTION};
    use crate::sbom_generation::services::{FileClassifier, SbomGenerator};
    use std::path::PathBuf;

    fn file(path: &str) -> ExtractedFile {
        FileClassifier::classify(
            path.to_string(),
            PathBuf::from(path),
            1,
            "ab".repeat(32),
            None,
        )
    }

    fn metadata() -> SbomMetadata {
        SbomGenerator::metadata_at("2024-01-01T00:00:00Z".to_string(), "setup.exe", "inno-sbom", "0.1.0")
    }

    #[test]
    fn test_build_metadata() {
        let model = SbomReadModelBuilder::build(&[], &[], &metadata());

        assert_eq!(model.metadata.timestamp, "2024-01-01T00:00:00Z");
        assert_eq!(model.metadata.tool_name, "inno-sbom");
        assert_eq!(model.metadata.document_name, "setup.exe");
        assert!(model.metadata.serial_number.starts_with("urn:uuid:"));
        assert!(model.components.is_empty());
        assert!(model.evidence.is_empty());
    }

    #[test]
    fn test_build_components_sorted_by_path() {
        let entries = vec![
            SbomEntry::unlicensed(&file("z/last.dll")),
            SbomEntry::unlicensed(&file("a/first.exe")),
        ];
        let model = SbomReadModelBuilder::build(&entries, &[], &metadata());

        let paths: Vec<_> = model.components.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["a/first.exe", "z/last.dll"]);
    }

    #[test]
    fn test_build_component_fields() {
        let source = file("bin/x64/app.exe");
        let mut entry = SbomEntry::unlicensed(&source);
        entry.license = NO_ASSERTION.to_string();
        entry.classification_status = ClassificationStatus::ManualReviewRequired;

        let model = SbomReadModelBuilder::build(&[entry], &[], &metadata());
        let component = &model.components[0];

        assert_eq!(component.file_id, source.id.to_string());
        assert_eq!(component.file_type, "executable");
        assert_eq!(component.architecture.as_deref(), Some("x64"));
        assert_eq!(component.language.as_deref(), Some("unknown"));
        assert_eq!(component.classification_status, "manual_review_required");
        assert_eq!(component.sha256_hash.len(), 64);
    }

    #[test]
    fn test_build_evidence() {
        let license = file("LICENSE");
        let evidence = LicenseEvidence {
            id: "evidence-1".to_string(),
            source_file_id: license.id.clone(),
            evidence_type: EvidenceType::LicenseFile,
            license_spdx_id: Some("MIT".to_string()),
            extracted_text: None,
            confidence: 0.99,
            summary: "License file detected (MIT)".to_string(),
        };

        let model = SbomReadModelBuilder::build(&[], &[evidence], &metadata());

        assert_eq!(model.evidence[0].evidence_type, "license_file");
        assert_eq!(model.evidence[0].license_spdx_id.as_deref(), Some("MIT"));
        assert_eq!(model.evidence[0].source_file_id, license.id.to_string());
    }
}
