use super::process::{run_with_timeout, BinarySpec};
use crate::ports::outbound::{ExtractOutput, ExtractRequest, Extractor};
use crate::sbom_generation::domain::{ExtractionError, ExtractionErrorCode, ExtractorTool};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;

/// InnoextractExtractor adapter driving `innoextract`, the fallback backend
///
/// Invoked as `innoextract -d <workdir> <installer>`.
pub struct InnoextractExtractor {
    binary: Option<PathBuf>,
}

impl InnoextractExtractor {
    pub const BINARY: BinarySpec = BinarySpec {
        name: "innoextract",
        env_overrides: &["INNOEXTRACT_PATH", "INNOEXTRACT_BIN"],
    };

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
        vec![
            OsString::from("-d"),
            request.workdir.clone().into_os_string(),
            request.installer.clone().into_os_string(),
        ]
    }
}

impl Default for InnoextractExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for InnoextractExtractor {
    fn tool(&self) -> ExtractorTool {
        ExtractorTool::Innoextract
    }

    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    async fn extract(&self, request: &ExtractRequest) -> Result<ExtractOutput, ExtractionError> {
        let binary = self.binary.as_deref().ok_or_else(|| {
            ExtractionError::new(ExtractionErrorCode::Unknown, "innoextract is not available")
        })?;

        run_with_timeout(binary, &Self::args(request), request.timeout)
            .await
            .map_err(|failure| failure.into_extraction_error(|text| self.map_error(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_args() {
        let request = ExtractRequest {
            installer: PathBuf::from("/in/setup.exe"),
            workdir: PathBuf::from("/out/workspace"),
            timeout: Duration::from_secs(5),
        };
        let args = InnoextractExtractor::args(&request);
        assert_eq!(args, vec!["-d", "/out/workspace", "/in/setup.exe"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_extract_maps_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("innoextract");
        std::fs::write(&script, "#!/bin/sh\necho 'Unsupported setup data version' >&2\nexit 1\n")
            .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let extractor = InnoextractExtractor::with_binary(script);
        let error = extractor
            .extract(&ExtractRequest {
                installer: dir.path().join("setup.exe"),
                workdir: dir.path().join("workspace"),
                timeout: Duration::from_secs(10),
            })
            .await
            .unwrap_err();
        assert_eq!(error.code, ExtractionErrorCode::UnsupportedCompression);
        assert!(error.message.contains("exited with code 1"));
    }
}
