use super::process::{run_with_timeout, BinarySpec};
use crate::ports::outbound::{ExtractOutput, ExtractRequest, Extractor};
use crate::sbom_generation::domain::{ExtractionError, ExtractionErrorCode, ExtractorTool};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;

/// InnounpExtractor adapter driving `innounp`, the primary backend
///
/// Invoked as `innounp -x -d<workdir> <installer>`.
pub struct InnounpExtractor {
    binary: Option<PathBuf>,
}

impl InnounpExtractor {
    pub const BINARY: BinarySpec = BinarySpec {
        name: "innounp",
        env_overrides: &["INNOUNP_PATH", "INNOUNP_BIN"],
    };

    /// Probes the environment for the executable
    pub fn new() -> Self {
        Self {
            binary: Self::BINARY.resolve(),
        }
    }

    pub fn with_binary(binary: PathBuf) -> Self {
        Self {
            binary: Some(binary),
        }
    }

    fn args(request: &ExtractRequest) -> Vec<OsString> {
        let mut dest = OsString::from("-d");
        dest.push(request.workdir.as_os_str());
        vec![
            OsString::from("-x"),
            dest,
            request.installer.clone().into_os_string(),
        ]
    }
}

impl Default for InnounpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for InnounpExtractor {
    fn tool(&self) -> ExtractorTool {
        ExtractorTool::Innounp
    }

    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    async fn extract(&self, request: &ExtractRequest) -> Result<ExtractOutput, ExtractionError> {
        let binary = self.binary.as_deref().ok_or_else(|| {
            ExtractionError::new(ExtractionErrorCode::Unknown, "innounp is not available")
        })?;

        run_with_timeout(binary, &Self::args(request), request.timeout)
            .await
            .map_err(|failure| failure.into_extraction_error(|text| self.map_error(text)))
    }
}
