use super::classify_files::ClassifyFilesUseCase;
use super::emit_sbom::{EmitSbomUseCase, EmittedDocument};
use super::extract_installer::{ExtractionFailure, ExtractionOrchestrator};
use crate::application::dto::{SbomFormat, ScanOutcome, ScanRequest};
use crate::application::factories::{FormatterFactory, FormatterSource};
use crate::application::read_models::SbomReadModelBuilder;
use crate::ports::outbound::{ArtifactWriter, ProgressReporter, WorkspaceReader};
use crate::sbom_generation::domain::{
    ExtractionErrorCode, ReportErrorCode, ScanReport, ScanReportError, ScanStatus,
};
use crate::sbom_generation::policies::LicensePatternTable;
use crate::sbom_generation::services::SbomGenerator;
use crate::shared::error::ExitCode;
use crate::shared::Result;
use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use std::time::Instant;

/// Why the pipeline stopped before `completed`
enum PipelineFailure {
    Extraction(ExtractionFailure),
    Stage {
        stage: ScanStatus,
        error: anyhow::Error,
    },
}

impl PipelineFailure {
    fn exit_code(&self) -> ExitCode {
        match self {
            PipelineFailure::Extraction(failure)
                if failure.error.code == ExtractionErrorCode::Timeout =>
            {
                ExitCode::Timeout
            }
            PipelineFailure::Extraction(_)
            | PipelineFailure::Stage {
                stage: ScanStatus::Pending,
                ..
            } => ExitCode::ExtractionFailed,
            PipelineFailure::Stage {
                stage: ScanStatus::SbomEmitting,
                ..
            } => ExitCode::EmissionFailed,
            PipelineFailure::Stage { .. } => ExitCode::ClassificationGap,
        }
    }
}

fn at_stage(stage: ScanStatus) -> impl FnOnce(anyhow::Error) -> PipelineFailure {
    move |error| PipelineFailure::Stage { stage, error }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// RunScanUseCase - drives one scan from installer to persisted report
///
/// Stages run strictly in order. Recoverable problems (invalid documents,
/// unexpected files, coverage shortfalls) are recorded in the report; an
/// extraction failure or I/O error abandons the run. Either way the report
/// is written to `scan-status.json` before this returns.
///
/// # Type Parameters
/// * `R` - WorkspaceReader implementation
/// * `W` - ArtifactWriter implementation
/// * `P` - ProgressReporter implementation
pub struct RunScanUseCase<R, W, P> {
    orchestrator: ExtractionOrchestrator,
    reader: R,
    writer: W,
    progress_reporter: P,
    patterns: &'static LicensePatternTable,
    formatters: FormatterSource,
}

impl<R, W, P> RunScanUseCase<R, W, P>
where
    R: WorkspaceReader,
    W: ArtifactWriter,
    P: ProgressReporter,
{
    /// Creates a new RunScanUseCase with injected dependencies
    pub fn new(
        orchestrator: ExtractionOrchestrator,
        reader: R,
        writer: W,
        progress_reporter: P,
    ) -> Self {
        Self {
            orchestrator,
            reader,
            writer,
            progress_reporter,
            patterns: LicensePatternTable::builtin(),
            formatters: FormatterFactory::create,
        }
    }

    /// Replaces the formatter source used while emitting documents
    pub fn with_formatters(mut self, formatters: FormatterSource) -> Self {
        self.formatters = formatters;
        self
    }

    /// Runs the scan described by `request`
    ///
    /// # Errors
    /// Only when the output directory or the report itself cannot be
    /// written; every other failure is reflected in the returned outcome.
    pub async fn execute(&self, request: &ScanRequest) -> Result<ScanOutcome> {
        self.writer
            .create_dir(&request.output_dir)
            .context("Failed to create output directory")?;
        let workdir = request.workspace_dir();

        let mut report = ScanReport::new(request.job_id(), now(), request.coverage_thresholds);
        tracing::info!(job_id = %report.job_id, installer = %request.installer.display(), "scan started");

        let exit_code = match self.run_pipeline(request, &mut report).await {
            Ok(()) => report.completed_exit_code(),
            Err(failure) => {
                let exit_code = failure.exit_code();
                match failure {
                    PipelineFailure::Extraction(failure) => {
                        report.extractor = failure.workspace.extractor;
                        report.errors.push(ScanReportError::from(&failure.error));
                        self.progress_reporter.report_error(&format!(
                            "❌ Extraction failed ({}): {}",
                            failure.error.code, failure.error.message
                        ));
                    }
                    PipelineFailure::Stage { stage, error } => {
                        tracing::error!(%stage, error = %format!("{:#}", error), "scan stage failed");
                        report.record_error(ReportErrorCode::ScanFailed, format!("{:#}", error));
                        self.progress_reporter
                            .report_error(&format!("❌ Scan failed while {}: {:#}", stage, error));
                    }
                }
                report.advance(ScanStatus::Failed)?;
                exit_code
            }
        };
        report.completed_at = Some(now());

        if request.retain_workspace {
            tracing::debug!(workdir = %workdir.display(), "workspace retained");
        } else if let Err(e) = self.writer.remove_dir(&workdir) {
            tracing::warn!(workdir = %workdir.display(), error = %e, "failed to remove workspace");
        }

        let report_path = request.report_path();
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;
        self.writer.write_artifact(&report_path, &json)?;

        if exit_code == ExitCode::Success {
            self.progress_reporter.report_completion(&format!(
                "✅ Scan completed: {}",
                report_path.display()
            ));
        } else {
            self.progress_reporter.report_error(&format!(
                "⚠️  Scan finished with status {} ({} error(s)), see {}",
                report.status,
                report.errors.len(),
                report_path.display()
            ));
        }

        Ok(ScanOutcome {
            report,
            report_path,
            exit_code,
        })
    }

    async fn run_pipeline(
        &self,
        request: &ScanRequest,
        report: &mut ScanReport,
    ) -> std::result::Result<(), PipelineFailure> {
        self.writer
            .remove_dir(&request.workspace_dir())
            .context("Failed to clear the previous extraction workspace")
            .map_err(at_stage(ScanStatus::Pending))?;

        report
            .advance(ScanStatus::Extracting)
            .map_err(at_stage(ScanStatus::Pending))?;
        self.progress_reporter
            .report(&format!("📦 Extracting {}...", request.installer.display()));

        let started = Instant::now();
        let extraction = self
            .orchestrator
            .run(
                &request.installer,
                request.workspace_dir(),
                request.timeout,
                &self.writer,
            )
            .await;
        report.timings.extract_seconds = Some(started.elapsed().as_secs_f64());
        let extraction = extraction.map_err(PipelineFailure::Extraction)?;
        report.extractor = extraction.workspace.extractor;
        tracing::debug!(
            stdout = %extraction.output.stdout,
            stderr = %extraction.output.stderr,
            "extractor output"
        );

        report
            .advance(ScanStatus::Classifying)
            .map_err(at_stage(ScanStatus::Extracting))?;
        let started = Instant::now();
        let classification =
            ClassifyFilesUseCase::new(&self.reader, &self.progress_reporter, self.patterns)
                .execute(&extraction.workspace.workdir, request.expected_paths.as_ref())
                .await
                .map_err(at_stage(ScanStatus::Classifying))?;
        report.timings.classify_seconds = Some(started.elapsed().as_secs_f64());
        report.update_coverage(classification.files.len());
        self.progress_reporter.report(&format!(
            "✅ Classified {} file(s), {} license evidence record(s)",
            classification.files.len(),
            classification.evidence.len()
        ));

        report
            .advance(ScanStatus::SbomEmitting)
            .map_err(at_stage(ScanStatus::Classifying))?;
        let started = Instant::now();
        let metadata = SbomGenerator::generate_default_metadata(&report.job_id);
        let model = SbomReadModelBuilder::build(
            &classification.entries,
            &classification.evidence,
            &metadata,
        );
        let documents = EmitSbomUseCase::new(&self.writer, &self.progress_reporter)
            .with_formatters(self.formatters)
            .execute(&model, &request.formats, &request.output_dir)
            .map_err(at_stage(ScanStatus::SbomEmitting))?;
        report.timings.emit_seconds = Some(started.elapsed().as_secs_f64());

        Self::record_documents(report, &documents);

        let attention = classification.attention_count();
        if request.fail_on_unsupported && attention > 0 {
            report.record_error(
                ReportErrorCode::ClassificationGap,
                format!("Found {} unsupported/unexpected files", attention),
            );
        }
        if report.coverage_below_threshold() {
            report.record_error(
                ReportErrorCode::CoverageBelowThreshold,
                "Coverage below required thresholds",
            );
        }

        report
            .advance(ScanStatus::Completed)
            .map_err(at_stage(ScanStatus::SbomEmitting))
    }

    fn record_documents(report: &mut ScanReport, documents: &[EmittedDocument]) {
        for document in documents {
            match document.format {
                SbomFormat::Spdx => report.sbom.spdx_path = Some(document.path.clone()),
                SbomFormat::CycloneDx => report.sbom.cyclonedx_path = Some(document.path.clone()),
            }
            if !document.is_valid() {
                report.record_error(
                    ReportErrorCode::SbomValidationFailed,
                    format!(
                        "{} document is invalid: {}",
                        document.format,
                        document.problems.join("; ")
                    ),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::filesystem::{FileSystemWriter, WorkspaceFileReader};
    use crate::adapters::outbound::formatters::SpdxFormatter;
    use crate::application::read_models::SbomReadModel;
    use crate::ports::outbound::{ExtractOutput, ExtractRequest, Extractor, SbomFormatter};
    use crate::sbom_generation::domain::{ExtractionError, ExtractorTool};
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    struct TreeExtractor {
        files: Vec<(&'static str, &'static str)>,
        failure: Option<ExtractionError>,
    }

    #[async_trait]
    impl Extractor for TreeExtractor {
        fn tool(&self) -> ExtractorTool {
            ExtractorTool::Innounp
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn extract(
            &self,
            request: &ExtractRequest,
        ) -> std::result::Result<ExtractOutput, ExtractionError> {
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            for (path, content) in &self.files {
                let target = request.workdir.join(path);
                fs::create_dir_all(target.parent().unwrap()).unwrap();
                fs::write(target, content).unwrap();
            }
            Ok(ExtractOutput::default())
        }
    }

    struct SilentReporter;

    impl ProgressReporter for SilentReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn use_case(
        extractor: TreeExtractor,
    ) -> RunScanUseCase<WorkspaceFileReader, FileSystemWriter, SilentReporter> {
        RunScanUseCase::new(
            ExtractionOrchestrator::new(vec![Box::new(extractor)]),
            WorkspaceFileReader::new(),
            FileSystemWriter::new(),
            SilentReporter,
        )
    }

    fn sample_tree() -> TreeExtractor {
        TreeExtractor {
            files: vec![
                ("README.md", "Sample application"),
                ("LICENSE", "Apache License\nVersion 2.0, January 2004"),
                ("bin/app.exe", "MZ"),
            ],
            failure: None,
        }
    }

    fn request(dir: &TempDir) -> ScanRequest {
        let installer = dir.path().join("setup.exe");
        fs::write(&installer, "installer").unwrap();
        ScanRequest::new(installer, dir.path().join("out"))
    }

    #[tokio::test]
    async fn test_successful_scan_writes_all_artifacts() {
        let dir = TempDir::new().unwrap();
        let request = request(&dir);

        let outcome = use_case(sample_tree()).execute(&request).await.unwrap();

        assert_eq!(outcome.exit_code, ExitCode::Success);
        assert_eq!(outcome.report.status, ScanStatus::Completed);
        assert!(outcome.report.errors.is_empty());
        assert_eq!(outcome.report.coverage.extracted, 100);
        assert_eq!(outcome.report.extractor, Some(ExtractorTool::Innounp));
        assert!(request.output_dir.join("sbom.spdx.json").exists());
        assert!(request.output_dir.join("sbom.cyclonedx.json").exists());
        assert!(!request.workspace_dir().exists());

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&outcome.report_path).unwrap()).unwrap();
        assert_eq!(written["status"], "completed");
        assert_eq!(written["jobId"], "setup.exe");
        assert!(written["completedAt"].is_string());
    }

    #[tokio::test]
    async fn test_timeout_fails_with_exit_code_6() {
        let dir = TempDir::new().unwrap();
        let request = request(&dir);
        let extractor = TreeExtractor {
            files: Vec::new(),
            failure: Some(ExtractionError::timeout(Duration::from_secs(1))),
        };

        let outcome = use_case(extractor).execute(&request).await.unwrap();

        assert_eq!(outcome.exit_code, ExitCode::Timeout);
        assert_eq!(outcome.report.status, ScanStatus::Failed);
        assert_eq!(outcome.report.errors.len(), 1);
        assert_eq!(outcome.report.errors[0].code, ReportErrorCode::Timeout);
        assert!(outcome.report_path.exists());
        assert!(!request.output_dir.join("sbom.spdx.json").exists());
    }

    #[tokio::test]
    async fn test_unexpected_files_with_fail_on_unsupported() {
        let dir = TempDir::new().unwrap();
        let mut request = request(&dir);
        request.fail_on_unsupported = true;
        request.expected_paths = Some(
            ["README.md", "LICENSE"]
                .iter()
                .map(|s| s.to_string())
                .collect::<HashSet<_>>(),
        );

        let outcome = use_case(sample_tree()).execute(&request).await.unwrap();

        assert_eq!(outcome.exit_code, ExitCode::ClassificationGap);
        assert_eq!(outcome.report.status, ScanStatus::Completed);
        assert_eq!(outcome.report.errors[0].code, ReportErrorCode::ClassificationGap);
        assert_eq!(
            outcome.report.errors[0].message,
            "Found 1 unsupported/unexpected files"
        );
    }

    #[tokio::test]
    async fn test_empty_extraction_is_below_threshold() {
        let dir = TempDir::new().unwrap();
        let request = request(&dir);
        let extractor = TreeExtractor {
            files: Vec::new(),
            failure: None,
        };

        let outcome = use_case(extractor).execute(&request).await.unwrap();

        assert_eq!(outcome.exit_code, ExitCode::ClassificationGap);
        assert!(outcome.report.has_error(ReportErrorCode::CoverageBelowThreshold));
        assert_eq!(outcome.report.coverage.classified, 0);
    }

    #[tokio::test]
    async fn test_retained_workspace_survives() {
        let dir = TempDir::new().unwrap();
        let mut request = request(&dir);
        request.retain_workspace = true;

        use_case(sample_tree()).execute(&request).await.unwrap();

        assert!(request.workspace_dir().join("bin/app.exe").exists());
    }

    #[tokio::test]
    async fn test_stale_workspace_is_replaced() {
        let dir = TempDir::new().unwrap();
        let mut request = request(&dir);
        request.retain_workspace = true;
        let stale = request.workspace_dir().join("stale.txt");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "old").unwrap();

        let outcome = use_case(sample_tree()).execute(&request).await.unwrap();

        assert!(!stale.exists());
        assert_eq!(outcome.report.coverage.extracted, 100);
    }

    #[tokio::test]
    async fn test_unclearable_workspace_still_writes_report() {
        let dir = TempDir::new().unwrap();
        let request = request(&dir);
        fs::create_dir_all(&request.output_dir).unwrap();
        fs::write(request.workspace_dir(), "not a directory").unwrap();

        let outcome = use_case(sample_tree()).execute(&request).await.unwrap();

        assert_eq!(outcome.exit_code, ExitCode::ExtractionFailed);
        assert_eq!(outcome.report.status, ScanStatus::Failed);
        assert_eq!(outcome.report.errors[0].code, ReportErrorCode::ScanFailed);
        assert!(outcome.report.errors[0]
            .message
            .contains("Failed to clear the previous extraction workspace"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&outcome.report_path).unwrap()).unwrap();
        assert_eq!(written["status"], "failed");
    }

    /// Renders an SPDX document with none of the required fields
    struct HollowSpdxFormatter;

    impl SbomFormatter for HollowSpdxFormatter {
        fn format(&self, _model: &SbomReadModel) -> Result<String> {
            Ok(r#"{"files":[]}"#.to_string())
        }

        fn validate(&self, content: &str) -> Vec<String> {
            SpdxFormatter::new().validate(content)
        }

        fn file_name(&self) -> &'static str {
            "sbom.spdx.json"
        }

        fn format_name(&self) -> &'static str {
            "SPDX"
        }
    }

    fn hollow_spdx(format: SbomFormat) -> Box<dyn SbomFormatter> {
        match format {
            SbomFormat::Spdx => Box::new(HollowSpdxFormatter),
            other => FormatterFactory::create(other),
        }
    }

    #[tokio::test]
    async fn test_invalid_document_completes_with_exit_code_5() {
        let dir = TempDir::new().unwrap();
        let request = request(&dir);

        let outcome = use_case(sample_tree())
            .with_formatters(hollow_spdx)
            .execute(&request)
            .await
            .unwrap();

        assert_eq!(outcome.report.status, ScanStatus::Completed);
        assert_eq!(outcome.exit_code, ExitCode::EmissionFailed);
        assert_eq!(outcome.report.errors.len(), 1);
        assert_eq!(
            outcome.report.errors[0].code,
            ReportErrorCode::SbomValidationFailed
        );
        assert!(outcome.report.errors[0].message.contains("spdxVersion"));

        let spdx_path = request.output_dir.join("sbom.spdx.json");
        assert_eq!(fs::read_to_string(&spdx_path).unwrap(), r#"{"files":[]}"#);
        assert_eq!(outcome.report.sbom.spdx_path.as_ref(), Some(&spdx_path));
        assert!(request.output_dir.join("sbom.cyclonedx.json").exists());
    }
}
