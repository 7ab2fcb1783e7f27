/// Mock implementations for testing
mod mock_extractor;
mod mock_progress_reporter;

pub use mock_extractor::MockExtractor;
pub use mock_progress_reporter::MockProgressReporter;
