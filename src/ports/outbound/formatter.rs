use crate::application::read_models::SbomReadModel;
use crate::shared::Result;

/// SbomFormatter port for rendering one SBOM document format
///
/// This port abstracts the formatting logic for the supported formats
/// (SPDX 2.3 JSON, CycloneDX 1.6 JSON).
pub trait SbomFormatter {
    /// Formats the SBOM using the unified read model
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &SbomReadModel) -> Result<String>;

    /// Checks rendered output against the format's schema rules
    ///
    /// Returns one message per problem; an empty list means valid.
    fn validate(&self, content: &str) -> Vec<String>;

    /// File name used inside the output directory
    fn file_name(&self) -> &'static str;

    /// Human readable name used in messages
    fn format_name(&self) -> &'static str;
}
