/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven ports exist: the CLI calls the use cases directly, and the
/// use cases reach extractors, the workspace, formatters, and the console
/// through the traits below.
pub mod outbound;
