use crate::sbom_generation::domain::file_identity::parent_dir;
use crate::sbom_generation::domain::{
    EvidenceType, ExtractedFile, FileId, LicenseEvidence, SbomEntry,
};
use crate::sbom_generation::policies::{EvidenceRef, LicensePatternTable, LicenseResolution};
use std::collections::HashMap;

/// LicenseInference service assigning a license to every extracted file
///
/// Evidence is attached directly when its source file is the entry itself.
/// Otherwise the entry inherits `license_file` evidence from the nearest
/// ancestor directory that has any; among equally near candidates the one
/// with the lexicographically smallest source path wins.
pub struct LicenseInference<'a> {
    table: &'a LicensePatternTable,
}

impl<'a> LicenseInference<'a> {
    pub fn new(table: &'a LicensePatternTable) -> Self {
        Self { table }
    }

    /// Produces one entry per file, in the order of `files`
    pub fn apply(&self, files: &[ExtractedFile], evidence: &[LicenseEvidence]) -> Vec<SbomEntry> {
        let paths: HashMap<&FileId, &str> = files
            .iter()
            .map(|f| (&f.id, f.install_path.as_str()))
            .collect();

        let refs: Vec<EvidenceRef<'_>> = evidence
            .iter()
            .filter_map(|e| {
                paths.get(&e.source_file_id).map(|path| EvidenceRef {
                    evidence: e,
                    source_path: *path,
                })
            })
            .collect();

        files
            .iter()
            .map(|file| {
                let chosen = Self::evidence_for(file, &refs);
                let resolved =
                    LicenseResolution::resolve(&file.install_path, &chosen, self.table);

                let mut entry = SbomEntry::unlicensed(file);
                entry.license = resolved.license;
                entry.classification_status = resolved.status;
                entry.evidence_ids = chosen.iter().map(|r| r.evidence.id.clone()).collect();
                entry
            })
            .collect()
    }

    fn evidence_for<'e>(file: &ExtractedFile, refs: &[EvidenceRef<'e>]) -> Vec<EvidenceRef<'e>> {
        let direct: Vec<EvidenceRef<'e>> = refs
            .iter()
            .copied()
            .filter(|r| r.evidence.source_file_id == file.id)
            .collect();
        if !direct.is_empty() {
            return direct;
        }

        let dir = parent_dir(&file.install_path);
        refs.iter()
            .copied()
            .filter(|r| r.evidence.evidence_type == EvidenceType::LicenseFile)
            .filter_map(|r| {
                let source_dir = parent_dir(r.source_path);
                is_ancestor_dir(source_dir, dir).then_some((source_dir.len(), r))
            })
            .max_by(|(depth_a, a), (depth_b, b)| {
                depth_a
                    .cmp(depth_b)
                    .then_with(|| b.source_path.cmp(a.source_path))
            })
            .map(|(_, r)| vec![r])
            .unwrap_or_default()
    }
}

/// `ancestor` equals `dir` or is one of its parent directories
fn is_ancestor_dir(ancestor: &str, dir: &str) -> bool {
    ancestor.is_empty()
        || dir == ancestor
        || (dir.starts_with(ancestor) && dir.as_bytes().get(ancestor.len()) == Some(&b'/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::{ClassificationStatus, NO_ASSERTION, README_LICENSE_REF};
    use crate::sbom_generation::services::{FileClassifier, LicenseEvidenceCollector};
    use std::path::PathBuf;

    const APACHE_TEXT: &str = "Licensed under the Apache License, Version 2.0";
    const MIT_TEXT: &str = "MIT License\n\nPermission is hereby granted, free of charge";

    fn files(paths: &[&str]) -> Vec<ExtractedFile> {
        paths
            .iter()
            .map(|p| {
                FileClassifier::classify(
                    p.to_string(),
                    PathBuf::from(format!("/ws/{}", p)),
                    1,
                    format!("hash-{}", p),
                    None,
                )
            })
            .collect()
    }

    fn run(paths: &[&str], texts: &[(&str, &str)]) -> Vec<SbomEntry> {
        let table = LicensePatternTable::builtin();
        let files = files(paths);
        let evidence = LicenseEvidenceCollector::new(table).collect(&files, |f| {
            texts
                .iter()
                .find(|(p, _)| *p == f.install_path)
                .map(|(_, t)| t.to_string())
        });
        LicenseInference::new(table).apply(&files, &evidence)
    }

    fn entry<'e>(entries: &'e [SbomEntry], path: &str) -> &'e SbomEntry {
        entries.iter().find(|e| e.path == path).unwrap()
    }

    #[test]
    fn test_root_license_is_inherited_by_nested_binary() {
        let entries = run(
            &["LICENSE", "README.md", "bin/app.exe"],
            &[("LICENSE", APACHE_TEXT)],
        );

        assert_eq!(entries.len(), 3);
        let license = entry(&entries, "LICENSE");
        assert_eq!(license.license, "Apache-2.0");
        assert_eq!(license.classification_status, ClassificationStatus::Classified);

        let app = entry(&entries, "bin/app.exe");
        assert_eq!(app.license, "Apache-2.0");
        assert_eq!(app.evidence_ids, license.evidence_ids);
    }

    #[test]
    fn test_nearest_directory_wins() {
        let entries = run(
            &["LICENSE", "vendor/zlib/LICENSE", "vendor/zlib/zlib1.dll", "vendor/other.dll"],
            &[("LICENSE", APACHE_TEXT), ("vendor/zlib/LICENSE", MIT_TEXT)],
        );

        assert_eq!(entry(&entries, "vendor/zlib/zlib1.dll").license, "MIT");
        assert_eq!(entry(&entries, "vendor/other.dll").license, "Apache-2.0");
    }

    #[test]
    fn test_sibling_prefix_is_not_an_ancestor() {
        let entries = run(
            &["lib/LICENSE", "library/core.dll"],
            &[("lib/LICENSE", MIT_TEXT)],
        );

        let core = entry(&entries, "library/core.dll");
        assert_eq!(core.license, NO_ASSERTION);
        assert!(core.evidence_ids.is_empty());
    }

    #[test]
    fn test_tie_break_is_lexicographic() {
        let entries = run(
            &["b-LICENSE.txt", "a-LICENSE.txt", "app.exe"],
            &[("a-LICENSE.txt", MIT_TEXT), ("b-LICENSE.txt", APACHE_TEXT)],
        );

        assert_eq!(entry(&entries, "app.exe").license, "MIT");
    }

    #[test]
    fn test_readme_is_not_inherited() {
        let entries = run(&["README.md", "bin/app.exe"], &[]);

        let readme = entry(&entries, "README.md");
        assert_eq!(readme.license, README_LICENSE_REF);
        assert_eq!(
            readme.classification_status,
            ClassificationStatus::ManualReviewRequired
        );

        let app = entry(&entries, "bin/app.exe");
        assert_eq!(app.license, NO_ASSERTION);
        assert_eq!(app.classification_status, ClassificationStatus::ManualReviewRequired);
    }

    #[test]
    fn test_ancestor_check() {
        assert!(is_ancestor_dir("", "bin"));
        assert!(is_ancestor_dir("bin", "bin"));
        assert!(is_ancestor_dir("bin", "bin/x64"));
        assert!(!is_ancestor_dir("bin", "binaries"));
        assert!(!is_ancestor_dir("bin/x64", "bin"));
    }
}
