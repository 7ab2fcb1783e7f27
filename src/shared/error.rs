use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Scan completed and no errors were recorded in the report
    Success = 0,
    /// Invalid command-line arguments or unusable installer path
    InvalidInput = 2,
    /// The installer could not be extracted
    ExtractionFailed = 3,
    /// Classification gap or coverage below the configured thresholds
    ClassificationGap = 4,
    /// SBOM documents could not be written or failed validation
    EmissionFailed = 5,
    /// The extraction backend exceeded the configured timeout
    Timeout = 6,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidInput => write!(f, "Invalid Input (2)"),
            ExitCode::ExtractionFailed => write!(f, "Extraction Failed (3)"),
            ExitCode::ClassificationGap => write!(f, "Classification Gap (4)"),
            ExitCode::EmissionFailed => write!(f, "Emission Failed (5)"),
            ExitCode::Timeout => write!(f, "Timeout (6)"),
        }
    }
}

/// Application-specific errors for installer scanning.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Installer not found: {path}\n\n💡 Hint: {suggestion}")]
    InstallerNotFound { path: PathBuf, suggestion: String },

    #[error("Invalid installer path: {path}\nReason: {reason}\n\n💡 Hint: Please pass a regular installer file with --installer")]
    InvalidInstallerPath { path: PathBuf, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    /// Validation error for configuration and request values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
