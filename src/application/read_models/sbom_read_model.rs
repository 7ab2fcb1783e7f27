//! SBOM read model for query operations
//!
//! This module provides the main read model struct that aggregates
//! all SBOM data in a query-optimized format.

use super::component_view::{ComponentView, EvidenceView};

/// Main read model for SBOM data
///
/// This struct provides a denormalized view of one scan's entries and
/// evidence, shared by every formatter.
#[derive(Debug, Clone)]
pub struct SbomReadModel {
    /// SBOM metadata
    pub metadata: SbomMetadataView,
    /// One component per extracted file, sorted by path
    pub components: Vec<ComponentView>,
    /// Every evidence record collected during the scan
    pub evidence: Vec<EvidenceView>,
}

/// View representation of SBOM metadata
#[derive(Debug, Clone)]
pub struct SbomMetadataView {
    /// Timestamp when the SBOM was created
    pub timestamp: String,
    /// Name of the tool that generated the SBOM
    pub tool_name: String,
    /// Version of the tool
    pub tool_version: String,
    /// Name of the scanned installer
    pub document_name: String,
    /// CycloneDX serial number (`urn:uuid:...`)
    pub serial_number: String,
    /// SPDX document namespace
    pub document_namespace: String,
}
