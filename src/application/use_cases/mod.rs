/// Use cases module containing application business logic orchestration
mod classify_files;
mod emit_sbom;
mod extract_installer;
mod run_scan;

pub use classify_files::{Classification, ClassifyFilesUseCase};
pub use emit_sbom::{EmitSbomUseCase, EmittedDocument};
pub use extract_installer::{ExtractionFailure, ExtractionOrchestrator, ExtractionRun};
pub use run_scan::RunScanUseCase;
