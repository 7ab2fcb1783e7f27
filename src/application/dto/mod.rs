/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod sbom_format;
mod scan_outcome;
mod scan_request;

pub use sbom_format::SbomFormat;
pub use scan_outcome::ScanOutcome;
pub use scan_request::{ScanRequest, DEFAULT_TIMEOUT};
