/// Filesystem adapters for workspace traversal and artifact output
mod file_reader;
mod file_writer;

pub use file_reader::WorkspaceFileReader;
pub use file_writer::FileSystemWriter;
