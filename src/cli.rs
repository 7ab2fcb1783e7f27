use clap::Parser;
use std::path::PathBuf;

use inno_sbom::application::dto::SbomFormat;

/// Comma separated list of SBOM formats
#[derive(Debug, Clone, PartialEq)]
pub struct FormatList(pub Vec<SbomFormat>);

impl std::str::FromStr for FormatList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SbomFormat::parse_list(s).map(FormatList)
    }
}

/// Verbosity of diagnostic logging on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!(
                "Invalid log level: {}. Please specify 'error', 'warn', 'info' or 'debug'",
                s
            )),
        }
    }
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Generate SPDX and CycloneDX SBOMs for Inno Setup installers
#[derive(Parser, Debug)]
#[command(name = "inno-sbom")]
#[command(version)]
#[command(about = "Generate SPDX and CycloneDX SBOMs for Inno Setup installers", long_about = None)]
pub struct Args {
    /// Installer executable to scan
    #[arg(long, value_name = "PATH")]
    pub installer: PathBuf,

    /// Directory receiving the SBOM documents and scan-status.json
    #[arg(long, value_name = "PATH")]
    pub output_dir: PathBuf,

    /// SBOM formats to emit: spdx, cyclonedx (default: both)
    #[arg(long, value_name = "LIST")]
    pub formats: Option<FormatList>,

    /// Record a classification gap when unexpected files are found
    #[arg(long)]
    pub fail_on_unsupported: bool,

    /// Keep the extraction workspace after the scan
    #[arg(long)]
    pub retain_workspace: bool,

    /// Hard limit for the extraction backend, in seconds (default: 900)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_seconds: Option<u64>,

    /// File listing the install paths the installer is expected to contain, one per line
    #[arg(long, value_name = "FILE")]
    pub expected_paths: Option<PathBuf>,

    /// Configuration file (defaults to ./inno-sbom.config.yml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Diagnostic log level: error, warn, info, debug (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
