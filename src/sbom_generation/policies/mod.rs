mod license_patterns;
mod license_resolution;

pub use license_patterns::{LicensePattern, LicensePatternTable};
pub use license_resolution::{EvidenceRef, LicenseResolution, ResolvedLicense};
