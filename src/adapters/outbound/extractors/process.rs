use crate::ports::outbound::ExtractOutput;
use crate::sbom_generation::domain::ExtractionError;
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// How to find one backend executable
#[derive(Debug, Clone, Copy)]
pub struct BinarySpec {
    pub name: &'static str,
    /// Environment variables holding an explicit path, checked in order
    pub env_overrides: &'static [&'static str],
}

impl BinarySpec {
    fn file_name(&self) -> String {
        format!("{}{}", self.name, env::consts::EXE_SUFFIX)
    }

    /// Locates the executable
    ///
    /// Lookup order: environment overrides, `./bin/<name>`, then `PATH`.
    pub fn resolve(&self) -> Option<PathBuf> {
        for var in self.env_overrides {
            if let Some(value) = env::var_os(var).filter(|v| !v.is_empty()) {
                let candidate = PathBuf::from(value);
                if candidate.is_file() {
                    return Some(candidate);
                }
                tracing::warn!(
                    tool = self.name,
                    var,
                    path = %candidate.display(),
                    "override does not point at a file"
                );
            }
        }

        let local = Path::new("bin").join(self.file_name());
        if local.is_file() {
            return Some(local);
        }

        env::var_os("PATH").and_then(|paths| self.find_in_path(&paths))
    }

    /// Searches a `PATH`-style list of directories
    pub fn find_in_path(&self, paths: &OsStr) -> Option<PathBuf> {
        let file_name = self.file_name();
        env::split_paths(paths)
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
    }
}

/// Why a backend process did not succeed
#[derive(Debug)]
pub enum ProcessFailure {
    Spawn(std::io::Error),
    TimedOut(Duration),
    Exited {
        status: String,
        stdout: String,
        stderr: String,
    },
}

impl ProcessFailure {
    /// Text handed to error mapping: stderr, stdout, then the exit status
    pub fn diagnostic_text(&self) -> String {
        match self {
            ProcessFailure::Spawn(err) => format!("failed to start extractor: {}", err),
            ProcessFailure::TimedOut(limit) => {
                format!("timed out after {} seconds", limit.as_secs())
            }
            ProcessFailure::Exited {
                status,
                stdout,
                stderr,
            } => [stderr.trim(), stdout.trim(), status.as_str()]
                .iter()
                .filter(|part| !part.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Converts into a classified error, using `map_text` for non-timeouts
    pub fn into_extraction_error<F>(self, map_text: F) -> ExtractionError
    where
        F: FnOnce(&str) -> ExtractionError,
    {
        match self {
            ProcessFailure::TimedOut(limit) => ExtractionError::timeout(limit),
            other => map_text(&other.diagnostic_text()),
        }
    }
}

/// Runs `program` with piped output, killing it if `timeout` elapses
pub async fn run_with_timeout(
    program: &Path,
    args: &[OsString],
    timeout: Duration,
) -> Result<ExtractOutput, ProcessFailure> {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(ProcessFailure::Spawn)?;

    // Dropping the wait future on timeout drops the child, which kills it.
    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(ProcessFailure::Spawn)?,
        Err(_) => return Err(ProcessFailure::TimedOut(timeout)),
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    tracing::debug!(program = %program.display(), %stdout, %stderr, "extractor finished");

    if output.status.success() {
        Ok(ExtractOutput { stdout, stderr })
    } else {
        let status = match output.status.code() {
            Some(code) => format!("exited with code {}", code),
            None => "terminated by signal".to_string(),
        };
        Err(ProcessFailure::Exited {
            status,
            stdout,
            stderr,
        })
    }
}
