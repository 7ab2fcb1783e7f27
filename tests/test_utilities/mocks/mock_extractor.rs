use async_trait::async_trait;
use inno_sbom::ports::outbound::{ExtractOutput, ExtractRequest};
use inno_sbom::prelude::*;
use inno_sbom::sbom_generation::domain::{ExtractionError, ExtractorTool};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock Extractor that writes a fixed file tree into the workspace
pub struct MockExtractor {
    pub tool: ExtractorTool,
    pub available: bool,
    pub files: Vec<(String, Vec<u8>)>,
    pub failure: Option<ExtractionError>,
    pub calls: Arc<AtomicUsize>,
}

impl MockExtractor {
    pub fn new(tool: ExtractorTool) -> Self {
        Self {
            tool,
            available: true,
            files: Vec::new(),
            failure: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unavailable(tool: ExtractorTool) -> Self {
        Self {
            available: false,
            ..Self::new(tool)
        }
    }

    pub fn with_file(mut self, install_path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.push((install_path.to_string(), content.into()));
        self
    }

    pub fn with_failure(mut self, error: ExtractionError) -> Self {
        self.failure = Some(error);
        self
    }

    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    fn tool(&self) -> ExtractorTool {
        self.tool
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn extract(
        &self,
        request: &ExtractRequest,
    ) -> std::result::Result<ExtractOutput, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        for (install_path, content) in &self.files {
            let target = request.workdir.join(install_path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(target, content).unwrap();
        }

        Ok(ExtractOutput {
            stdout: format!("extracted {} files", self.files.len()),
            stderr: String::new(),
        })
    }
}
