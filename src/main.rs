mod cli;
mod config;

use cli::{Args, LogLevel};
use config::{discover_config, load_config_from_path, load_expected_paths, ConfigFile};
use inno_sbom::adapters::outbound::console::StderrProgressReporter;
use inno_sbom::adapters::outbound::extractors::{InnoextractExtractor, InnounpExtractor};
use inno_sbom::adapters::outbound::filesystem::{FileSystemWriter, WorkspaceFileReader};
use inno_sbom::application::dto::ScanRequest;
use inno_sbom::application::use_cases::{ExtractionOrchestrator, RunScanUseCase};
use inno_sbom::sbom_generation::domain::ScanStatus;
use inno_sbom::shared::error::{ExitCode, SbomError};
use inno_sbom::shared::security::validate_regular_file;
use inno_sbom::shared::Result;
use std::path::Path;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse command-line arguments; clap exits with status 2 on its own errors
    let args = Args::parse_args();
    init_tracing(args.log_level);

    let request = match build_request(&args) {
        Ok(request) => request,
        Err(e) => {
            print_failure("INVALID_INPUT", &e);
            process::exit(ExitCode::InvalidInput.as_i32());
        }
    };

    let exit_code = match run(request).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            print_failure("SCAN_FAILED", &e);
            ExitCode::EmissionFailed
        }
    };
    process::exit(exit_code.as_i32());
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.as_filter().to_string()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_failure(code: &str, error: &anyhow::Error) {
    eprintln!(
        "{}",
        serde_json::json!({ "error": code, "message": format!("{:#}", error) })
    );
}

async fn run(request: ScanRequest) -> Result<ExitCode> {
    // Create adapters (Dependency Injection)
    let orchestrator = ExtractionOrchestrator::new(vec![
        Box::new(InnounpExtractor::new()),
        Box::new(InnoextractExtractor::new()),
    ]);
    let use_case = RunScanUseCase::new(
        orchestrator,
        WorkspaceFileReader::new(),
        FileSystemWriter::new(),
        StderrProgressReporter::new(),
    );

    let outcome = use_case.execute(&request).await?;

    if outcome.report.status == ScanStatus::Failed {
        let message = outcome
            .report
            .errors
            .first()
            .map(|e| e.message.as_str())
            .unwrap_or("scan failed");
        eprintln!(
            "{}",
            serde_json::json!({ "error": "SCAN_FAILED", "message": message })
        );
    }

    tracing::info!(exit_code = %outcome.exit_code, "scan finished");
    Ok(outcome.exit_code)
}

/// Merges flags over the config file into a scan request
fn build_request(args: &Args) -> Result<ScanRequest> {
    validate_installer_path(&args.installer)?;

    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => {
            let cwd = std::env::current_dir()?;
            discover_config(&cwd)?.unwrap_or_default()
        }
    };

    let mut request = ScanRequest::new(args.installer.clone(), args.output_dir.clone());
    apply_config(&mut request, &config)?;

    if let Some(formats) = &args.formats {
        request.formats = formats.0.clone();
    }
    if args.fail_on_unsupported {
        request.fail_on_unsupported = true;
    }
    if args.retain_workspace {
        request.retain_workspace = true;
    }
    if let Some(seconds) = args.timeout_seconds {
        request.timeout = Duration::from_secs(seconds);
    }
    if let Some(path) = &args.expected_paths {
        request.expected_paths = Some(load_expected_paths(path)?);
    }

    Ok(request)
}

fn apply_config(request: &mut ScanRequest, config: &ConfigFile) -> Result<()> {
    if let Some(formats) = config.parsed_formats()? {
        request.formats = formats;
    }
    if let Some(flag) = config.fail_on_unsupported {
        request.fail_on_unsupported = flag;
    }
    if let Some(flag) = config.retain_workspace {
        request.retain_workspace = flag;
    }
    if let Some(seconds) = config.timeout_seconds {
        request.timeout = Duration::from_secs(seconds);
    }
    if let Some(paths) = config.expected_path_set() {
        request.expected_paths = Some(paths);
    }
    if let Some(thresholds) = config.coverage_thresholds {
        request.coverage_thresholds = thresholds.to_thresholds();
    }
    Ok(())
}

fn validate_installer_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SbomError::InstallerNotFound {
            path: path.to_path_buf(),
            suggestion: "Check the --installer path; it must point at an existing setup executable"
                .to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links and directories
    validate_regular_file(path, "installer").map_err(|e| SbomError::InvalidInstallerPath {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(())
}
