use super::FileId;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Coarse file category, decided by extension only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Executable,
    Dll,
    Script,
    Resource,
    Config,
    Documentation,
    Other,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Executable => "executable",
            FileType::Dll => "dll",
            FileType::Script => "script",
            FileType::Resource => "resource",
            FileType::Config => "config",
            FileType::Documentation => "documentation",
            FileType::Other => "other",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target architecture guessed from path tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X86,
    X64,
    Arm64,
    Unknown,
}

impl Architecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X64 => "x64",
            Architecture::Arm64 => "arm64",
            Architecture::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Ok,
    Unsupported,
    Failed,
}

/// Version-resource fields of a binary. Currently always empty; PE parsing is not done.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Marker placed in `status_message` for files missing from the expected-path allow-list
pub const UNEXPECTED_FILE_MESSAGE: &str = "unexpected file";

/// One file found in the extraction workspace
///
/// Created by the classifier and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFile {
    pub id: FileId,
    pub install_path: String,
    pub extracted_path: PathBuf,
    pub size_bytes: u64,
    pub checksum: String,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub architecture: Architecture,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FileMetadata>,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl ExtractedFile {
    /// True when the file is unsupported, failed, or flagged by the allow-list
    pub fn needs_attention(&self) -> bool {
        self.status != FileStatus::Ok || self.status_message.is_some()
    }
}
