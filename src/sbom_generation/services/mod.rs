mod evidence_collector;
mod file_classifier;
mod license_inference;
mod sbom_generator;

pub use evidence_collector::{LicenseEvidenceCollector, EXTRACTED_TEXT_LIMIT};
pub use file_classifier::FileClassifier;
pub use license_inference::LicenseInference;
pub use sbom_generator::SbomGenerator;
