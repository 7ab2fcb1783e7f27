use super::validators::{validate_json, validate_spdx};
use crate::application::read_models::{ComponentView, EvidenceView, SbomReadModel};
use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::domain::{NO_ASSERTION, UNKNOWN_LICENSE};
use crate::shared::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxDocument {
    spdx_version: &'static str,
    data_license: &'static str,
    #[serde(rename = "SPDXID")]
    spdx_id: &'static str,
    name: String,
    document_namespace: String,
    creation_info: CreationInfo,
    files: Vec<SpdxFile>,
    has_extracted_licensing_infos: Vec<ExtractedLicensingInfo>,
}

#[derive(Debug, Serialize)]
struct CreationInfo {
    created: String,
    creators: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpdxFile {
    #[serde(rename = "SPDXID")]
    spdx_id: String,
    file_name: String,
    checksums: Vec<Checksum>,
    license_concluded: String,
    file_types: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    annotations: Vec<Annotation>,
    comment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Checksum {
    algorithm: &'static str,
    checksum_value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Annotation {
    annotation_type: &'static str,
    annotator: String,
    annotation_date: String,
    comment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractedLicensingInfo {
    license_id: String,
    name: String,
    extracted_text: String,
}

#[derive(Debug, Serialize)]
struct FileComment<'a> {
    architecture: Option<&'a str>,
    language: Option<&'a str>,
}

/// SpdxFormatter adapter for generating SPDX 2.3 JSON
///
/// Every evidence record becomes a `LicenseRef-<evidence id>` entry in
/// `hasExtractedLicensingInfos`, and every `LicenseRef-*` used as a
/// concluded license is declared there as well.
pub struct SpdxFormatter;

impl SpdxFormatter {
    pub fn new() -> Self {
        Self
    }

    fn build_file(&self, component: &ComponentView, model: &SbomReadModel) -> SpdxFile {
        let comment = serde_json::to_string(&FileComment {
            architecture: component.architecture.as_deref(),
            language: component.language.as_deref(),
        })
        .unwrap_or_default();

        SpdxFile {
            spdx_id: format!("SPDXRef-File-{}", component.file_id),
            file_name: format!("./{}", component.path),
            checksums: vec![Checksum {
                algorithm: "SHA256",
                checksum_value: component.sha256_hash.clone(),
            }],
            license_concluded: concluded_license(&component.license).to_string(),
            file_types: vec![spdx_file_type(&component.file_type)],
            annotations: component
                .evidence_ids
                .iter()
                .map(|id| Annotation {
                    annotation_type: "OTHER",
                    annotator: format!("Tool: {} ({})", model.metadata.tool_name, id),
                    annotation_date: model.metadata.timestamp.clone(),
                    comment: format!("evidence:{}", id),
                })
                .collect(),
            comment,
        }
    }

    fn build_licensing_infos(&self, model: &SbomReadModel) -> Vec<ExtractedLicensingInfo> {
        let by_id: BTreeMap<&str, &EvidenceView> =
            model.evidence.iter().map(|e| (e.id.as_str(), e)).collect();

        let mut infos: Vec<ExtractedLicensingInfo> = model
            .evidence
            .iter()
            .map(|e| ExtractedLicensingInfo {
                license_id: format!("LicenseRef-{}", e.id),
                name: e.id.clone(),
                extracted_text: e.summary.clone(),
            })
            .collect();

        // Concluded LicenseRefs not already declared, first use wins
        let mut referenced: BTreeMap<&str, String> = BTreeMap::new();
        for component in &model.components {
            if !component.license.starts_with("LicenseRef-") {
                continue;
            }
            referenced.entry(component.license.as_str()).or_insert_with(|| {
                component
                    .evidence_ids
                    .iter()
                    .filter_map(|id| by_id.get(id.as_str()))
                    .map(|e| e.summary.as_str())
                    .collect::<Vec<_>>()
                    .join("; ")
            });
        }
        for (license_id, summary) in referenced {
            if infos.iter().any(|i| i.license_id == license_id) {
                continue;
            }
            infos.push(ExtractedLicensingInfo {
                license_id: license_id.to_string(),
                name: license_id.trim_start_matches("LicenseRef-").to_string(),
                extracted_text: if summary.is_empty() {
                    NO_ASSERTION.to_string()
                } else {
                    summary
                },
            });
        }

        infos
    }
}

impl Default for SpdxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for SpdxFormatter {
    fn format(&self, model: &SbomReadModel) -> Result<String> {
        let document = SpdxDocument {
            spdx_version: "SPDX-2.3",
            data_license: "CC0-1.0",
            spdx_id: "SPDXRef-DOCUMENT",
            name: model.metadata.document_name.clone(),
            document_namespace: model.metadata.document_namespace.clone(),
            creation_info: CreationInfo {
                created: model.metadata.timestamp.clone(),
                creators: vec![format!(
                    "Tool: {}-{}",
                    model.metadata.tool_name, model.metadata.tool_version
                )],
            },
            files: model
                .components
                .iter()
                .map(|c| self.build_file(c, model))
                .collect(),
            has_extracted_licensing_infos: self.build_licensing_infos(model),
        };

        serde_json::to_string_pretty(&document).map_err(Into::into)
    }

    fn validate(&self, content: &str) -> Vec<String> {
        validate_json(content, validate_spdx)
    }

    fn file_name(&self) -> &'static str {
        "sbom.spdx.json"
    }

    fn format_name(&self) -> &'static str {
        "SPDX"
    }
}

/// `unknown` is not a valid SPDX license expression
fn concluded_license(license: &str) -> &str {
    if license == UNKNOWN_LICENSE {
        NO_ASSERTION
    } else {
        license
    }
}

fn spdx_file_type(file_type: &str) -> &'static str {
    match file_type {
        "executable" | "dll" => "BINARY",
        "script" => "SOURCE",
        "config" => "TEXT",
        "documentation" => "DOCUMENTATION",
        _ => "OTHER",
    }
}
