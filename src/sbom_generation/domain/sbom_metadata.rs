/// SbomMetadata value object shared by both SBOM documents of one scan
#[derive(Debug, Clone)]
pub struct SbomMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
    document_name: String,
    serial_number: String,
    document_namespace: String,
}

impl SbomMetadata {
    pub fn new(
        timestamp: String,
        tool_name: String,
        tool_version: String,
        document_name: String,
        serial_number: String,
        document_namespace: String,
    ) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            document_name,
            serial_number,
            document_namespace,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    /// Name of the scanned installer
    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    /// CycloneDX `urn:uuid:` serial number
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// SPDX document namespace URI
    pub fn document_namespace(&self) -> &str {
        &self.document_namespace
    }
}
