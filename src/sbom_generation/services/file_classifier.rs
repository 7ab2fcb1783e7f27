use crate::sbom_generation::domain::{
    derive_file_id, Architecture, ExtractedFile, FileMetadata, FileStatus, FileType,
    UNEXPECTED_FILE_MESSAGE,
};
use std::collections::HashSet;
use std::path::PathBuf;

/// Extension lookup table; anything not listed is `Other`
const EXTENSION_TYPES: &[(&str, FileType)] = &[
    ("exe", FileType::Executable),
    ("com", FileType::Executable),
    ("dll", FileType::Dll),
    ("ps1", FileType::Script),
    ("bat", FileType::Script),
    ("cmd", FileType::Script),
    ("vbs", FileType::Script),
    ("js", FileType::Script),
    ("ini", FileType::Config),
    ("cfg", FileType::Config),
    ("conf", FileType::Config),
    ("xml", FileType::Config),
    ("json", FileType::Config),
    ("yaml", FileType::Config),
    ("yml", FileType::Config),
    ("txt", FileType::Documentation),
    ("md", FileType::Documentation),
    ("rtf", FileType::Documentation),
    ("pdf", FileType::Documentation),
    ("chm", FileType::Documentation),
    ("ico", FileType::Resource),
    ("bmp", FileType::Resource),
    ("png", FileType::Resource),
    ("jpg", FileType::Resource),
    ("jpeg", FileType::Resource),
    ("gif", FileType::Resource),
    ("res", FileType::Resource),
];

/// Path tokens per architecture, checked in this order
const ARCHITECTURE_TOKENS: &[(&[&str], Architecture)] = &[
    (&["x64", "amd64"], Architecture::X64),
    (&["x86", "win32"], Architecture::X86),
    (&["arm64", "aarch64"], Architecture::Arm64),
];

/// FileClassifier service assigning type, architecture, and locale to a file
///
/// All rules look at the install path only; file contents are never inspected.
pub struct FileClassifier;

impl FileClassifier {
    pub fn classify_file_type(install_path: &str) -> FileType {
        let file_name = install_path.rsplit('/').next().unwrap_or(install_path);
        let extension = match file_name.rfind('.') {
            Some(idx) if idx > 0 => file_name[idx + 1..].to_lowercase(),
            _ => return FileType::Other,
        };
        EXTENSION_TYPES
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, file_type)| *file_type)
            .unwrap_or(FileType::Other)
    }

    /// Lossy guess from substrings such as `x64` or `win32` anywhere in the path
    pub fn detect_architecture(install_path: &str) -> Architecture {
        let lowered = install_path.to_lowercase();
        ARCHITECTURE_TOKENS
            .iter()
            .find(|(tokens, _)| tokens.iter().any(|t| lowered.contains(t)))
            .map(|(_, arch)| *arch)
            .unwrap_or(Architecture::Unknown)
    }

    /// First path segment shaped like `de` or `pt-BR`, else `unknown`
    pub fn detect_language(install_path: &str) -> String {
        install_path
            .split('/')
            .find(|segment| is_locale_token(segment))
            .unwrap_or("unknown")
            .to_string()
    }

    /// Builds the immutable record for one file
    ///
    /// With an allow-list, files missing from it stay `ok` but carry the
    /// "unexpected file" status message.
    pub fn classify(
        install_path: String,
        extracted_path: PathBuf,
        size_bytes: u64,
        checksum: String,
        expected_paths: Option<&HashSet<String>>,
    ) -> ExtractedFile {
        let unexpected = expected_paths.is_some_and(|allowed| !allowed.contains(&install_path));

        ExtractedFile {
            id: derive_file_id(&install_path, &checksum),
            file_type: Self::classify_file_type(&install_path),
            architecture: Self::detect_architecture(&install_path),
            language: Self::detect_language(&install_path),
            install_path,
            extracted_path,
            size_bytes,
            checksum,
            metadata: Some(FileMetadata::default()),
            status: FileStatus::Ok,
            status_message: unexpected.then(|| UNEXPECTED_FILE_MESSAGE.to_string()),
        }
    }
}

fn is_locale_token(segment: &str) -> bool {
    let b = segment.as_bytes();
    match b.len() {
        2 => b[0].is_ascii_lowercase() && b[1].is_ascii_lowercase(),
        5 => {
            b[0].is_ascii_lowercase()
                && b[1].is_ascii_lowercase()
                && b[2] == b'-'
                && b[3].is_ascii_uppercase()
                && b[4].is_ascii_uppercase()
        }
        _ => false,
    }
}
