/// Formatter adapters for the supported SBOM output formats
mod cyclonedx_formatter;
mod spdx_formatter;
mod validators;

pub use cyclonedx_formatter::CycloneDxFormatter;
pub use spdx_formatter::SpdxFormatter;
pub use validators::{validate_cyclonedx, validate_spdx};
