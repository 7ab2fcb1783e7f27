use crate::sbom_generation::domain::SbomMetadata;
use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

/// SbomGenerator service for generating SBOM document metadata
///
/// Serial number and namespace are UUID v5 values derived from the document
/// name, so rescanning the same installer yields the same identifiers and
/// only the timestamp changes.
pub struct SbomGenerator;

impl SbomGenerator {
    /// Generates metadata stamped with the current time
    pub fn generate_metadata(document_name: &str, tool_name: &str, tool_version: &str) -> SbomMetadata {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        Self::metadata_at(timestamp, document_name, tool_name, tool_version)
    }

    /// Generates metadata with default tool information (inno-sbom)
    ///
    /// This uses the compile-time version from Cargo.toml
    pub fn generate_default_metadata(document_name: &str) -> SbomMetadata {
        Self::generate_metadata(document_name, "inno-sbom", env!("CARGO_PKG_VERSION"))
    }

    /// Builds metadata for a fixed timestamp
    pub fn metadata_at(
        timestamp: String,
        document_name: &str,
        tool_name: &str,
        tool_version: &str,
    ) -> SbomMetadata {
        let uuid = Uuid::new_v5(
            &Uuid::NAMESPACE_URL,
            format!("urn:inno-sbom:{}", document_name).as_bytes(),
        );
        let namespace = format!(
            "https://spdx.org/spdxdocs/{}-{}",
            namespace_segment(document_name),
            uuid
        );

        SbomMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            document_name.to_string(),
            format!("urn:uuid:{}", uuid),
            namespace,
        )
    }
}

fn namespace_segment(document_name: &str) -> String {
    let segment: String = document_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '-' })
        .collect();
    if segment.is_empty() {
        "installer".to_string()
    } else {
        segment
    }
}
