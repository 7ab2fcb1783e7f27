/// Extraction backends wrapping external unpacking tools
mod innoextract;
mod innounp;
mod process;

pub use innoextract::InnoextractExtractor;
pub use innounp::InnounpExtractor;
pub use process::{run_with_timeout, BinarySpec, ProcessFailure};
