use crate::sbom_generation::domain::file_identity::base_name;
use crate::sbom_generation::domain::{
    EvidenceIdSequence, EvidenceType, ExtractedFile, LicenseEvidence,
};
use crate::sbom_generation::policies::LicensePatternTable;

/// Maximum number of characters kept in `LicenseEvidence::extracted_text`
pub const EXTRACTED_TEXT_LIMIT: usize = 2000;

const README_CONFIDENCE: f64 = 0.9;
const LICENSE_CONFIDENCE: f64 = 0.95;
const RESOLVED_LICENSE_CONFIDENCE: f64 = 0.99;

/// LicenseEvidenceCollector service for turning license/readme files into evidence
///
/// File contents are supplied by the caller through `read_text`, which
/// returns `None` when a file could not be read or exceeds the size ceiling.
/// Such files still yield evidence, just without text or an SPDX id.
pub struct LicenseEvidenceCollector<'a> {
    table: &'a LicensePatternTable,
}

impl<'a> LicenseEvidenceCollector<'a> {
    pub fn new(table: &'a LicensePatternTable) -> Self {
        Self { table }
    }

    /// Classifies a file name into an evidence kind, if any
    pub fn evidence_kind(install_path: &str) -> Option<EvidenceType> {
        let name = base_name(install_path).to_lowercase();
        if name.starts_with("readme") {
            Some(EvidenceType::Readme)
        } else if name.contains("license") || name.contains("licence") || name == "copying" {
            Some(EvidenceType::LicenseFile)
        } else {
            None
        }
    }

    /// Collects evidence for `files` in order, numbering ids from a fresh sequence
    pub fn collect<F>(&self, files: &[ExtractedFile], mut read_text: F) -> Vec<LicenseEvidence>
    where
        F: FnMut(&ExtractedFile) -> Option<String>,
    {
        let mut ids = EvidenceIdSequence::new();
        let mut evidence = Vec::new();

        for file in files {
            let Some(kind) = Self::evidence_kind(&file.install_path) else {
                continue;
            };
            let text = read_text(file).filter(|t| !t.is_empty());
            evidence.push(self.build(file, kind, text, ids.next_id()));
        }

        evidence
    }

    fn build(
        &self,
        file: &ExtractedFile,
        kind: EvidenceType,
        text: Option<String>,
        id: String,
    ) -> LicenseEvidence {
        let extracted_text = text
            .as_deref()
            .map(|t| t.chars().take(EXTRACTED_TEXT_LIMIT).collect::<String>());

        let (license_spdx_id, confidence, summary) = match kind {
            EvidenceType::Readme => (
                None,
                README_CONFIDENCE,
                "README file detected as license evidence".to_string(),
            ),
            _ => match text.as_deref().and_then(|t| self.table.match_text(t)) {
                Some(spdx_id) => (
                    Some(spdx_id.to_string()),
                    RESOLVED_LICENSE_CONFIDENCE,
                    format!("License file detected ({})", spdx_id),
                ),
                None => (None, LICENSE_CONFIDENCE, "License file detected".to_string()),
            },
        };

        LicenseEvidence {
            id,
            source_file_id: file.id.clone(),
            evidence_type: kind,
            license_spdx_id,
            extracted_text,
            confidence,
            summary,
        }
    }
}
