use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// External extraction backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorTool {
    Innounp,
    Innoextract,
}

impl ExtractorTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractorTool::Innounp => "innounp",
            ExtractorTool::Innoextract => "innoextract",
        }
    }
}

impl fmt::Display for ExtractorTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Pending,
    Extracting,
    Extracted,
    Failed,
}

/// Closed taxonomy of extraction failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionErrorCode {
    UnsupportedCompression,
    MissingSegment,
    PasswordProtected,
    Corrupted,
    Timeout,
    Unknown,
}

impl ExtractionErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionErrorCode::UnsupportedCompression => "UNSUPPORTED_COMPRESSION",
            ExtractionErrorCode::MissingSegment => "MISSING_SEGMENT",
            ExtractionErrorCode::PasswordProtected => "PASSWORD_PROTECTED",
            ExtractionErrorCode::Corrupted => "CORRUPTED",
            ExtractionErrorCode::Timeout => "TIMEOUT",
            ExtractionErrorCode::Unknown => "UNKNOWN",
        }
    }

    /// Maps diagnostic text from a failed backend run onto the taxonomy
    ///
    /// Quoted strings are dropped first so file names from a backend's
    /// listing (`- "app/VolumeMixer.dll"`) never select a code. Never yields
    /// `Timeout`: timeouts are detected by the process runner, not from
    /// output text.
    pub fn from_failure_text(text: &str) -> Self {
        let patterns = FailurePatterns::get();
        let text = patterns.quoted.replace_all(text, "");
        if patterns.password.is_match(&text) {
            ExtractionErrorCode::PasswordProtected
        } else if patterns.unsupported.is_match(&text) {
            ExtractionErrorCode::UnsupportedCompression
        } else if patterns.missing_segment.is_match(&text) {
            ExtractionErrorCode::MissingSegment
        } else if patterns.corrupted.is_match(&text) {
            ExtractionErrorCode::Corrupted
        } else {
            ExtractionErrorCode::Unknown
        }
    }
}

struct FailurePatterns {
    quoted: Regex,
    password: Regex,
    unsupported: Regex,
    missing_segment: Regex,
    corrupted: Regex,
}

impl FailurePatterns {
    fn get() -> &'static FailurePatterns {
        static PATTERNS: OnceLock<FailurePatterns> = OnceLock::new();
        PATTERNS.get_or_init(|| {
            let compile =
                |pattern: &str| Regex::new(pattern).expect("failure text patterns must compile");
            FailurePatterns {
                quoted: compile(r#""[^"\n]*""#),
                password: compile(r"(?i)\bpassword\b"),
                unsupported: compile(r"(?i)\bunsupported\b"),
                missing_segment: compile(concat!(
                    r"(?i)\b(?:segment|volume|slice)s?\b[^\n]*\b(?:missing|not found)\b",
                    r"|\b(?:missing|not found|cannot open|can't open|could not open|unable to open)\b",
                    r"[^\n]*\b(?:segment|volume|slice)s?\b",
                )),
                corrupted: compile(concat!(
                    r"(?i)\bcorrupt(?:ed|ion)?\b",
                    r"|\b(?:crc(?:32)?|checksum)\s+(?:mismatch|error|failed|failure)\b",
                )),
            }
        })
    }
}

impl fmt::Display for ExtractionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified extraction failure
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{code}: {message}")]
pub struct ExtractionError {
    pub code: ExtractionErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

impl ExtractionError {
    pub fn new(code: ExtractionErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            segment: None,
        }
    }

    pub fn timeout(limit: Duration) -> Self {
        Self::new(
            ExtractionErrorCode::Timeout,
            format!("Extraction timed out after {} seconds", limit.as_secs()),
        )
    }

    /// Builds an error whose code is inferred from the backend's diagnostic text
    pub fn from_failure_text(text: &str) -> Self {
        let message = text.trim();
        let message = if message.is_empty() {
            "Unknown extraction error"
        } else {
            message
        };
        let code = ExtractionErrorCode::from_failure_text(message);
        let mut error = Self::new(code, message);
        if code == ExtractionErrorCode::MissingSegment {
            error.segment = segment_name(message);
        }
        error
    }
}

/// First token that names a disk slice such as `setup-2.bin`
fn segment_name(text: &str) -> Option<String> {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !(c.is_alphanumeric() || c == '.' || c == '-' || c == '_')))
        .find(|token| token.to_lowercase().ends_with(".bin") && token.len() > 4)
        .map(String::from)
}

/// Per-scan extraction directory and its lifecycle
///
/// `Extracted` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionWorkspace {
    pub workdir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractor: Option<ExtractorTool>,
    pub status: ExtractionStatus,
    pub errors: Vec<ExtractionError>,
}

impl ExtractionWorkspace {
    pub fn new(workdir: PathBuf) -> Self {
        Self {
            workdir,
            extractor: None,
            status: ExtractionStatus::Pending,
            errors: Vec::new(),
        }
    }

    pub fn begin(&mut self, tool: ExtractorTool) {
        self.extractor = Some(tool);
        self.status = ExtractionStatus::Extracting;
    }

    pub fn complete(mut self) -> Self {
        self.status = ExtractionStatus::Extracted;
        self
    }

    pub fn fail(mut self, error: ExtractionError) -> Self {
        self.status = ExtractionStatus::Failed;
        self.errors.push(error);
        self
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            ExtractionStatus::Extracted | ExtractionStatus::Failed
        )
    }
}
