//! Component view structs for read model
//!
//! These structs provide a flattened, query-optimized view of the
//! per-file SBOM entries and the evidence they reference.

/// View representation of one installed file
#[derive(Debug, Clone)]
pub struct ComponentView {
    /// Stable file identifier, used as bom-ref / SPDX element id
    pub file_id: String,
    /// Normalized install path
    pub path: String,
    /// Hex SHA-256 of the file contents
    pub sha256_hash: String,
    /// Classifier file type (`executable`, `dll`, ...)
    pub file_type: String,
    /// SPDX id, `LicenseRef-*`, `NOASSERTION`, or `unknown`
    pub license: String,
    pub classification_status: String,
    pub architecture: Option<String>,
    pub language: Option<String>,
    /// Ids of the evidence records that produced the license
    pub evidence_ids: Vec<String>,
}

/// View representation of a license evidence record
#[derive(Debug, Clone)]
pub struct EvidenceView {
    pub id: String,
    pub source_file_id: String,
    pub evidence_type: String,
    pub license_spdx_id: Option<String>,
    pub summary: String,
}
