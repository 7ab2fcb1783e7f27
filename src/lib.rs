//! inno-sbom - SBOM generation tool for Inno Setup installers
//!
//! This library unpacks an installer with an external extraction backend,
//! classifies every file it would install, attributes licenses from the
//! README and LICENSE files found alongside them, and emits SPDX 2.3 and
//! CycloneDX 1.6 documents plus a `scan-status.json` report. It follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use inno_sbom::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn scan() -> Result<()> {
//! // Create adapters
//! let orchestrator = ExtractionOrchestrator::new(vec![
//!     Box::new(InnounpExtractor::new()),
//!     Box::new(InnoextractExtractor::new()),
//! ]);
//!
//! // Create use case
//! let use_case = RunScanUseCase::new(
//!     orchestrator,
//!     WorkspaceFileReader::new(),
//!     FileSystemWriter::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! // Execute
//! let request = ScanRequest::new(PathBuf::from("setup.exe"), PathBuf::from("out"));
//! let outcome = use_case.execute(&request).await?;
//! println!("{}", outcome.report.status);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::extractors::{InnoextractExtractor, InnounpExtractor};
    pub use crate::adapters::outbound::filesystem::{FileSystemWriter, WorkspaceFileReader};
    pub use crate::adapters::outbound::formatters::{CycloneDxFormatter, SpdxFormatter};
    pub use crate::application::dto::{SbomFormat, ScanOutcome, ScanRequest};
    pub use crate::application::use_cases::{ExtractionOrchestrator, RunScanUseCase};
    pub use crate::ports::outbound::{
        ArtifactWriter, Extractor, ProgressReporter, SbomFormatter, WorkspaceReader,
    };
    pub use crate::sbom_generation::domain::{
        ExtractedFile, LicenseEvidence, SbomEntry, ScanReport, ScanStatus,
    };
    pub use crate::sbom_generation::policies::LicensePatternTable;
    pub use crate::sbom_generation::services::{LicenseInference, SbomGenerator};
    pub use crate::shared::Result;
}
