use super::validators::{validate_cyclonedx, validate_json};
use crate::application::read_models::{ComponentView, SbomMetadataView, SbomReadModel};
use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::domain::{NO_ASSERTION, UNKNOWN_LICENSE};
use crate::shared::Result;
use serde::Serialize;

/// Version reported for components and the installer itself; files inside an
/// installer carry no version of their own
const COMPONENT_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
struct Bom {
    #[serde(rename = "bomFormat")]
    bom_format: &'static str,
    #[serde(rename = "specVersion")]
    spec_version: &'static str,
    #[serde(rename = "serialNumber")]
    serial_number: String,
    version: u32,
    metadata: Metadata,
    components: Vec<Component>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    timestamp: String,
    tools: Vec<Tool>,
    component: MetadataComponent,
}

#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct MetadataComponent {
    #[serde(rename = "type")]
    component_type: &'static str,
    name: String,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct Component {
    #[serde(rename = "type")]
    component_type: &'static str,
    #[serde(rename = "bom-ref")]
    bom_ref: String,
    name: String,
    version: &'static str,
    hashes: Vec<Hash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<Vec<License>>,
    properties: Vec<Property>,
}

#[derive(Debug, Serialize)]
struct Hash {
    alg: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct License {
    license: LicenseContent,
}

#[derive(Debug, Serialize)]
struct LicenseContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct Property {
    name: String,
    value: String,
}

impl Property {
    fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// CycloneDxFormatter adapter for generating CycloneDX 1.6 JSON format
///
/// This adapter implements the SbomFormatter port for CycloneDX format.
pub struct CycloneDxFormatter;

impl CycloneDxFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Build metadata from SbomMetadataView
    fn build_metadata(&self, metadata: &SbomMetadataView) -> Metadata {
        Metadata {
            timestamp: metadata.timestamp.clone(),
            tools: vec![Tool {
                name: metadata.tool_name.clone(),
                version: metadata.tool_version.clone(),
            }],
            component: MetadataComponent {
                component_type: "application",
                name: metadata.document_name.clone(),
                version: COMPONENT_VERSION,
            },
        }
    }

    fn build_component(&self, component: &ComponentView) -> Component {
        Component {
            component_type: "file",
            bom_ref: component.file_id.clone(),
            name: component.path.clone(),
            version: COMPONENT_VERSION,
            hashes: vec![Hash {
                alg: "SHA-256",
                content: component.sha256_hash.clone(),
            }],
            licenses: self.build_license(&component.license),
            properties: self.build_properties(component),
        }
    }

    /// Omitted for `unknown`; SPDX ids go in `id`, everything else in `name`
    fn build_license(&self, license: &str) -> Option<Vec<License>> {
        if license == UNKNOWN_LICENSE {
            return None;
        }
        let content = if license == NO_ASSERTION || license.starts_with("LicenseRef-") {
            LicenseContent {
                id: None,
                name: Some(license.to_string()),
            }
        } else {
            LicenseContent {
                id: Some(license.to_string()),
                name: None,
            }
        };
        Some(vec![License { license: content }])
    }

    fn build_properties(&self, component: &ComponentView) -> Vec<Property> {
        let mut properties = vec![
            Property::new(
                "inno:architecture",
                component.architecture.as_deref().unwrap_or("unknown"),
            ),
            Property::new(
                "inno:language",
                component.language.as_deref().unwrap_or("unknown"),
            ),
            Property::new("inno:fileType", component.file_type.as_str()),
            Property::new(
                "inno:classificationStatus",
                component.classification_status.as_str(),
            ),
        ];
        properties.extend(
            component
                .evidence_ids
                .iter()
                .map(|id| Property::new("inno:evidenceId", id.as_str())),
        );
        properties
    }
}

impl Default for CycloneDxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxFormatter {
    fn format(&self, model: &SbomReadModel) -> Result<String> {
        let bom = Bom {
            bom_format: "CycloneDX",
            spec_version: "1.6",
            serial_number: model.metadata.serial_number.clone(),
            version: 1,
            metadata: self.build_metadata(&model.metadata),
            components: model
                .components
                .iter()
                .map(|c| self.build_component(c))
                .collect(),
        };

        serde_json::to_string_pretty(&bom).map_err(Into::into)
    }

    fn validate(&self, content: &str) -> Vec<String> {
        validate_json(content, validate_cyclonedx)
    }

    fn file_name(&self) -> &'static str {
        "sbom.cyclonedx.json"
    }

    fn format_name(&self) -> &'static str {
        "CycloneDX"
    }
}
