/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (extractor binaries, file system, console).
pub mod artifact_writer;
pub mod extractor;
pub mod formatter;
pub mod progress_reporter;
pub mod workspace_reader;

pub use artifact_writer::ArtifactWriter;
pub use extractor::{ExtractOutput, ExtractRequest, Extractor};
pub use formatter::SbomFormatter;
pub use progress_reporter::ProgressReporter;
pub use workspace_reader::WorkspaceReader;
