use crate::ports::outbound::{ProgressReporter, WorkspaceReader};
use crate::sbom_generation::domain::{
    normalize_install_path, ExtractedFile, LicenseEvidence, SbomEntry,
};
use crate::sbom_generation::policies::LicensePatternTable;
use crate::sbom_generation::services::{FileClassifier, LicenseEvidenceCollector, LicenseInference};
use crate::shared::checksum::{compute_content_hash, ContentHash};
use crate::shared::security::MAX_EVIDENCE_FILE_SIZE;
use crate::shared::Result;
use anyhow::Context;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Upper bound on files hashed at the same time
const HASH_CONCURRENCY: usize = 8;

/// Classified files plus the evidence and licensed entries derived from them
#[derive(Debug, Clone)]
pub struct Classification {
    /// Sorted by install path
    pub files: Vec<ExtractedFile>,
    pub evidence: Vec<LicenseEvidence>,
    /// One per file, same order as `files`
    pub entries: Vec<SbomEntry>,
}

impl Classification {
    /// Files that are unsupported or outside the allow-list
    pub fn attention_count(&self) -> usize {
        self.files.iter().filter(|f| f.needs_attention()).count()
    }
}

/// ClassifyFilesUseCase - walks the workspace and produces licensed SBOM entries
///
/// Hashing runs on the blocking pool with bounded concurrency; the final
/// file list is sorted by install path regardless of completion order.
pub struct ClassifyFilesUseCase<'a, R, P> {
    reader: &'a R,
    progress_reporter: &'a P,
    patterns: &'a LicensePatternTable,
}

impl<'a, R, P> ClassifyFilesUseCase<'a, R, P>
where
    R: WorkspaceReader,
    P: ProgressReporter,
{
    pub fn new(reader: &'a R, progress_reporter: &'a P, patterns: &'a LicensePatternTable) -> Self {
        Self {
            reader,
            progress_reporter,
            patterns,
        }
    }

    pub async fn execute(
        &self,
        workdir: &Path,
        expected_paths: Option<&HashSet<String>>,
    ) -> Result<Classification> {
        let paths = self.reader.list_files(workdir)?;
        self.progress_reporter
            .report(&format!("🔍 Classifying {} extracted file(s)...", paths.len()));

        let hashed = self.hash_files(paths).await?;

        let mut files = Vec::with_capacity(hashed.len());
        for (path, digest) in hashed {
            let relative = path.strip_prefix(workdir).with_context(|| {
                format!("{} is outside the workspace", path.display())
            })?;
            let install_path = normalize_install_path(&relative.to_string_lossy());
            files.push(FileClassifier::classify(
                install_path,
                path,
                digest.size_bytes,
                digest.hash,
                expected_paths,
            ));
        }
        files.sort_by(|a, b| a.install_path.cmp(&b.install_path));

        let evidence = LicenseEvidenceCollector::new(self.patterns).collect(&files, |file| {
            match self
                .reader
                .read_text_prefix(&file.extracted_path, MAX_EVIDENCE_FILE_SIZE)
            {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(path = %file.install_path, error = %e, "could not read evidence file");
                    None
                }
            }
        });
        tracing::info!(
            stage = "classifying",
            files = files.len(),
            evidence = evidence.len(),
            "classification complete"
        );

        let entries = LicenseInference::new(self.patterns).apply(&files, &evidence);

        Ok(Classification {
            files,
            evidence,
            entries,
        })
    }

    async fn hash_files(&self, paths: Vec<PathBuf>) -> Result<Vec<(PathBuf, ContentHash)>> {
        let total = paths.len();
        let mut pending = stream::iter(paths)
            .map(|path| {
                tokio::task::spawn_blocking(move || {
                    let digest = compute_content_hash(&path);
                    (path, digest)
                })
            })
            .buffer_unordered(HASH_CONCURRENCY);

        let mut hashed = Vec::with_capacity(total);
        while let Some(joined) = pending.next().await {
            let (path, digest) = joined.context("Hashing task failed")?;
            hashed.push((path, digest?));
            self.progress_reporter
                .report_progress(hashed.len(), total, Some("hashing files"));
        }
        Ok(hashed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::filesystem::WorkspaceFileReader;
    use crate::sbom_generation::domain::{ClassificationStatus, FileType};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingReporter {
        progress_calls: RefCell<usize>,
    }

    impl ProgressReporter for CountingReporter {
        fn report(&self, _message: &str) {}

        fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {
            *self.progress_calls.borrow_mut() += 1;
        }

        fn report_error(&self, _message: &str) {}

        fn report_completion(&self, _message: &str) {}
    }

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("bin")).unwrap();
        fs::write(dir.path().join("README.md"), "Demo application").unwrap();
        fs::write(
            dir.path().join("LICENSE"),
            "Apache License\nVersion 2.0, January 2004",
        )
        .unwrap();
        fs::write(dir.path().join("bin/app.exe"), [0x4d, 0x5a, 0x90, 0x00]).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_classifies_and_licenses_workspace() {
        let dir = workspace();
        let reader = WorkspaceFileReader::new();
        let reporter = CountingReporter::default();
        let use_case =
            ClassifyFilesUseCase::new(&reader, &reporter, LicensePatternTable::builtin());

        let result = use_case.execute(dir.path(), None).await.unwrap();

        let paths: Vec<_> = result.files.iter().map(|f| f.install_path.as_str()).collect();
        assert_eq!(paths, vec!["LICENSE", "README.md", "bin/app.exe"]);
        assert_eq!(result.files[2].file_type, FileType::Executable);
        assert_eq!(result.files[2].size_bytes, 4);
        assert_eq!(result.evidence.len(), 2);
        assert_eq!(*reporter.progress_calls.borrow(), 3);

        assert_eq!(result.entries[0].license, "Apache-2.0");
        assert_eq!(result.entries[0].classification_status, ClassificationStatus::Classified);
        assert_eq!(result.entries[1].license, "LicenseRef-Readme");
        assert_eq!(result.entries[2].license, "Apache-2.0");
        assert_eq!(result.attention_count(), 0);
    }

    #[tokio::test]
    async fn test_allow_list_marks_unexpected_files() {
        let dir = workspace();
        let reader = WorkspaceFileReader::new();
        let reporter = CountingReporter::default();
        let allowed: HashSet<String> = ["LICENSE", "README.md"].iter().map(|s| s.to_string()).collect();

        let result = ClassifyFilesUseCase::new(&reader, &reporter, LicensePatternTable::builtin())
            .execute(dir.path(), Some(&allowed))
            .await
            .unwrap();

        assert_eq!(result.attention_count(), 1);
        let app = result.files.iter().find(|f| f.install_path == "bin/app.exe").unwrap();
        assert!(app.status_message.as_deref().unwrap().contains("unexpected"));
    }

    #[tokio::test]
    async fn test_identical_runs_produce_identical_ids() {
        let dir = workspace();
        let reader = WorkspaceFileReader::new();
        let reporter = CountingReporter::default();
        let use_case =
            ClassifyFilesUseCase::new(&reader, &reporter, LicensePatternTable::builtin());

        let first = use_case.execute(dir.path(), None).await.unwrap();
        let second = use_case.execute(dir.path(), None).await.unwrap();

        let ids = |c: &Classification| c.files.iter().map(|f| f.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.entries, second.entries);
    }

    #[tokio::test]
    async fn test_empty_workspace() {
        let dir = TempDir::new().unwrap();
        let reader = WorkspaceFileReader::new();
        let reporter = CountingReporter::default();

        let result = ClassifyFilesUseCase::new(&reader, &reporter, LicensePatternTable::builtin())
            .execute(dir.path(), None)
            .await
            .unwrap();

        assert!(result.files.is_empty());
        assert!(result.entries.is_empty());
    }
}
