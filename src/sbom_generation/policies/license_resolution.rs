use super::LicensePatternTable;
use crate::sbom_generation::domain::file_identity::base_name;
use crate::sbom_generation::domain::{
    ClassificationStatus, EvidenceType, LicenseEvidence, NO_ASSERTION, README_LICENSE_REF,
};

/// Evidence chosen for an entry, paired with the install path of the file it came from
#[derive(Debug, Clone, Copy)]
pub struct EvidenceRef<'a> {
    pub evidence: &'a LicenseEvidence,
    pub source_path: &'a str,
}

/// Outcome of license resolution for a single SBOM entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLicense {
    pub license: String,
    pub status: ClassificationStatus,
}

impl ResolvedLicense {
    fn classified(license: impl Into<String>) -> Self {
        Self {
            license: license.into(),
            status: ClassificationStatus::Classified,
        }
    }

    fn needs_review(license: impl Into<String>) -> Self {
        Self {
            license: license.into(),
            status: ClassificationStatus::ManualReviewRequired,
        }
    }
}

/// LicenseResolution policy for turning evidence into a license identifier
///
/// Priority order:
/// 1. Entry path, evidence summaries, or evidence file names matching the pattern table
/// 2. A license file whose text resolved to an SPDX id
/// 3. A license file without a resolved id (`LicenseRef-<file name>`)
/// 4. A README only (`LicenseRef-Readme`, needs review)
/// 5. Nothing (`NOASSERTION`, needs review)
///
/// README evidence never takes part in step 1, so a README alone cannot
/// produce a concrete SPDX id.
pub struct LicenseResolution;

impl LicenseResolution {
    pub fn resolve(
        entry_path: &str,
        evidence: &[EvidenceRef<'_>],
        table: &LicensePatternTable,
    ) -> ResolvedLicense {
        if evidence.is_empty() {
            return ResolvedLicense::needs_review(NO_ASSERTION);
        }

        let substantive: Vec<&EvidenceRef<'_>> = evidence
            .iter()
            .filter(|e| e.evidence.evidence_type != EvidenceType::Readme)
            .collect();

        if !substantive.is_empty() {
            if let Some(spdx_id) = Self::match_hints(entry_path, &substantive, table) {
                return ResolvedLicense::classified(spdx_id);
            }
        }

        let license_files: Vec<&EvidenceRef<'_>> = substantive
            .iter()
            .copied()
            .filter(|e| e.evidence.evidence_type == EvidenceType::LicenseFile)
            .collect();

        if let Some(spdx_id) = license_files
            .iter()
            .find_map(|e| e.evidence.license_spdx_id.as_deref())
        {
            return ResolvedLicense::classified(spdx_id);
        }

        if !license_files.is_empty() {
            let source = license_files
                .iter()
                .find(|e| e.source_path.to_lowercase().contains("licen"))
                .unwrap_or(&license_files[0]);
            return ResolvedLicense::classified(Self::license_ref_for(source.source_path));
        }

        if evidence
            .iter()
            .any(|e| e.evidence.evidence_type == EvidenceType::Readme)
        {
            return ResolvedLicense::needs_review(README_LICENSE_REF);
        }

        ResolvedLicense::needs_review(NO_ASSERTION)
    }

    /// Synthesizes `LicenseRef-<stem>` from a license file path
    ///
    /// The stem keeps only characters valid in an SPDX idstring.
    pub fn license_ref_for(source_path: &str) -> String {
        let file_name = base_name(source_path);
        let stem = match file_name.rfind('.') {
            Some(idx) if idx > 0 => &file_name[..idx],
            _ => file_name,
        };
        let sanitized: String = stem
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();

        if sanitized.is_empty() {
            "LicenseRef-LicenseFile".to_string()
        } else {
            format!("LicenseRef-{}", sanitized)
        }
    }

    fn match_hints(
        entry_path: &str,
        evidence: &[&EvidenceRef<'_>],
        table: &LicensePatternTable,
    ) -> Option<&'static str> {
        std::iter::once(entry_path)
            .chain(evidence.iter().map(|e| e.evidence.summary.as_str()))
            .chain(evidence.iter().map(|e| e.source_path))
            .find_map(|hint| table.match_hint(hint))
    }
}
