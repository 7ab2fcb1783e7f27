use crate::ports::outbound::{ArtifactWriter, ExtractOutput, ExtractRequest, Extractor};
use crate::sbom_generation::domain::{
    ExtractionError, ExtractionErrorCode, ExtractionWorkspace, ExtractorTool,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const NO_EXTRACTOR_MESSAGE: &str = "No extractor available: neither innounp nor innoextract was found. \
Install one of them on PATH, place it in ./bin, or point INNOUNP_PATH / INNOEXTRACT_PATH at the executable";

/// A finished extraction
#[derive(Debug)]
pub struct ExtractionRun {
    pub workspace: ExtractionWorkspace,
    pub output: ExtractOutput,
    /// True when the primary backend was unavailable
    pub used_fallback: bool,
}

/// A failed extraction with the workspace state at the time of failure
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ExtractionFailure {
    pub error: ExtractionError,
    pub workspace: ExtractionWorkspace,
}

impl ExtractionFailure {
    fn new(workspace: ExtractionWorkspace, error: ExtractionError) -> Self {
        Self {
            workspace: workspace.fail(error.clone()),
            error,
        }
    }
}

/// ExtractionOrchestrator - picks a backend and runs it against the installer
///
/// Backends are tried in priority order by availability only: once a
/// backend is selected, its failure is final and no other backend runs.
pub struct ExtractionOrchestrator {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractionOrchestrator {
    /// Creates an orchestrator; the first entry is the primary backend
    pub fn new(extractors: Vec<Box<dyn Extractor>>) -> Self {
        Self { extractors }
    }

    /// First available backend and whether it is a fallback
    pub fn select(&self) -> Option<(&dyn Extractor, bool)> {
        self.extractors
            .iter()
            .enumerate()
            .find(|(_, extractor)| extractor.is_available())
            .map(|(index, extractor)| (extractor.as_ref(), index > 0))
    }

    /// Tool that `run` would use
    pub fn selected_tool(&self) -> Option<ExtractorTool> {
        self.select().map(|(extractor, _)| extractor.tool())
    }

    /// Extracts `installer` into `workdir`
    ///
    /// The workspace directory is only created once a backend was found.
    pub async fn run<W>(
        &self,
        installer: &Path,
        workdir: PathBuf,
        timeout: Duration,
        writer: &W,
    ) -> Result<ExtractionRun, ExtractionFailure>
    where
        W: ArtifactWriter + ?Sized,
    {
        let mut workspace = ExtractionWorkspace::new(workdir.clone());

        let Some((extractor, used_fallback)) = self.select() else {
            tracing::error!(stage = "extracting", "no extraction backend available");
            return Err(ExtractionFailure::new(
                workspace,
                ExtractionError::new(ExtractionErrorCode::Unknown, NO_EXTRACTOR_MESSAGE),
            ));
        };

        let tool = extractor.tool();
        tracing::info!(
            stage = "extracting",
            %tool,
            code = if used_fallback { "FALLBACK_EXTRACTOR" } else { "PRIMARY_EXTRACTOR" },
            "using extractor"
        );

        workspace.begin(tool);
        if let Err(e) = writer.create_dir(&workdir) {
            return Err(ExtractionFailure::new(
                workspace,
                ExtractionError::new(
                    ExtractionErrorCode::Unknown,
                    format!("Failed to create workspace: {:#}", e),
                ),
            ));
        }

        let request = ExtractRequest {
            installer: installer.to_path_buf(),
            workdir,
            timeout,
        };
        match extractor.extract(&request).await {
            Ok(output) => Ok(ExtractionRun {
                workspace: workspace.complete(),
                output,
                used_fallback,
            }),
            Err(error) => {
                tracing::error!(stage = "extracting", %tool, code = %error.code, "extraction failed");
                Err(ExtractionFailure::new(workspace, error))
            }
        }
    }
}
