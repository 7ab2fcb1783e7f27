use crate::application::dto::SbomFormat;
use crate::application::factories::{FormatterFactory, FormatterSource};
use crate::application::read_models::SbomReadModel;
use crate::ports::outbound::{ArtifactWriter, ProgressReporter};
use crate::shared::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// One SBOM document written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedDocument {
    pub format: SbomFormat,
    pub path: PathBuf,
    /// Schema problems found after writing; empty when the document is valid
    pub problems: Vec<String>,
}

impl EmittedDocument {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// EmitSbomUseCase - renders, writes, and validates the requested documents
///
/// Validation never blocks a write: an invalid document stays on disk and
/// its problems are returned to the caller.
pub struct EmitSbomUseCase<'a, W, P> {
    writer: &'a W,
    progress_reporter: &'a P,
    formatters: FormatterSource,
}

impl<'a, W, P> EmitSbomUseCase<'a, W, P>
where
    W: ArtifactWriter,
    P: ProgressReporter,
{
    pub fn new(writer: &'a W, progress_reporter: &'a P) -> Self {
        Self {
            writer,
            progress_reporter,
            formatters: FormatterFactory::create,
        }
    }

    /// Replaces the formatter source
    pub fn with_formatters(mut self, formatters: FormatterSource) -> Self {
        self.formatters = formatters;
        self
    }

    /// # Errors
    /// Returns an error if rendering or writing any document fails
    pub fn execute(
        &self,
        model: &SbomReadModel,
        formats: &[SbomFormat],
        output_dir: &Path,
    ) -> Result<Vec<EmittedDocument>> {
        let mut emitted = Vec::with_capacity(formats.len());

        for &format in formats {
            self.progress_reporter
                .report(FormatterFactory::progress_message(format));

            let formatter = (self.formatters)(format);
            let content = formatter
                .format(model)
                .with_context(|| format!("Failed to render {} document", formatter.format_name()))?;

            let path = output_dir.join(formatter.file_name());
            self.writer.write_artifact(&path, &content)?;

            let problems = formatter.validate(&content);
            if problems.is_empty() {
                tracing::info!(stage = "sbom_emitting", %format, path = %path.display(), "document written");
            } else {
                tracing::warn!(
                    stage = "sbom_emitting",
                    %format,
                    problems = problems.len(),
                    "document failed validation"
                );
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: {} document failed validation: {}",
                    formatter.format_name(),
                    problems.join("; ")
                ));
            }

            emitted.push(EmittedDocument {
                format,
                path,
                problems,
            });
        }

        Ok(emitted)
    }
}
