/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("inno-sbom").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("inno-sbom").arg("--version").assert().code(0);
    }

    /// Exit code 2: Missing required flags
    #[test]
    fn test_exit_code_missing_arguments() {
        cargo_bin_cmd!("inno-sbom")
            .args(["--output-dir", "out"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("inno-sbom")
            .args(["--installer", "setup.exe", "--output-dir", "out"])
            .args(["--formats", "markdown"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Installer does not exist
    #[test]
    fn test_exit_code_missing_installer() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("inno-sbom")
            .current_dir(dir.path())
            .args(["--installer", "/nonexistent/setup.exe", "--output-dir", "out"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("INVALID_INPUT"));
    }

    /// Exit code 2: Invalid config file values
    #[test]
    fn test_exit_code_invalid_config() {
        let dir = TempDir::new().unwrap();
        let installer = dir.path().join("setup.exe");
        fs::write(&installer, "MZ").unwrap();
        let config = dir.path().join("inno-sbom.config.yml");
        fs::write(&config, "timeout_seconds: 0\n").unwrap();

        cargo_bin_cmd!("inno-sbom")
            .current_dir(dir.path())
            .arg("--installer")
            .arg(&installer)
            .arg("--output-dir")
            .arg(dir.path().join("out"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("timeout_seconds"));
    }
}

#[cfg(unix)]
mod backend_tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Writes `body` as an executable shell script
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&path, permissions).unwrap();
        path
    }

    /// innounp stand-in: takes the workspace from the `-d<dir>` argument
    const FAKE_INNOUNP: &str = r#"
for arg in "$@"; do
  case "$arg" in
    -d*) out="${arg#-d}" ;;
  esac
done
mkdir -p "$out/bin" "$out/lang/de"
printf 'MIT License\n\nPermission is hereby granted, free of charge\n' > "$out/LICENSE.txt"
printf 'Demo\n' > "$out/README.md"
printf 'MZ' > "$out/bin/app.exe"
printf 'Hallo' > "$out/lang/de/strings.ini"
echo "extracted 4 files"
"#;

    struct Fixture {
        dir: TempDir,
        installer: PathBuf,
        output: PathBuf,
        empty_path: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let installer = dir.path().join("setup.exe");
        fs::write(&installer, "MZ").unwrap();
        let output = dir.path().join("out");
        let empty_path = dir.path().join("empty-path");
        fs::create_dir_all(&empty_path).unwrap();
        Fixture {
            dir,
            installer,
            output,
            empty_path,
        }
    }

    fn scan(fx: &Fixture) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("inno-sbom");
        cmd.current_dir(fx.dir.path())
            .env_remove("INNOUNP_BIN")
            .env_remove("INNOEXTRACT_PATH")
            .env_remove("INNOEXTRACT_BIN")
            .env_remove("RUST_LOG")
            .arg("--installer")
            .arg(&fx.installer)
            .arg("--output-dir")
            .arg(&fx.output);
        cmd
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_scan_success() {
        let fx = fixture();
        let innounp = write_script(fx.dir.path(), "innounp", FAKE_INNOUNP);

        scan(&fx).env("INNOUNP_PATH", &innounp).assert().code(0);

        let report = read_json(&fx.output.join("scan-status.json"));
        assert_eq!(report["status"], "completed");
        assert_eq!(report["jobId"], "setup.exe");
        assert_eq!(report["extractor"], "innounp");
        assert_eq!(report["coverage"]["extracted"], 100);
        assert!(!fx.output.join("workspace").exists());

        let spdx = read_json(&fx.output.join("sbom.spdx.json"));
        let files = spdx["files"].as_array().unwrap();
        assert_eq!(files.len(), 4);
        let app = files.iter().find(|f| f["fileName"] == "./bin/app.exe").unwrap();
        assert_eq!(app["licenseConcluded"], "MIT");
        assert!(fx.output.join("sbom.cyclonedx.json").exists());
    }

    #[test]
    fn test_scan_single_format_and_retained_workspace() {
        let fx = fixture();
        let innounp = write_script(fx.dir.path(), "innounp", FAKE_INNOUNP);

        scan(&fx)
            .env("INNOUNP_PATH", &innounp)
            .args(["--formats", "cyclonedx", "--retain-workspace"])
            .assert()
            .code(0);

        assert!(!fx.output.join("sbom.spdx.json").exists());
        assert!(fx.output.join("sbom.cyclonedx.json").exists());
        assert!(fx.output.join("workspace/bin/app.exe").exists());
    }

    #[test]
    fn test_scan_expected_paths_with_fail_on_unsupported() {
        let fx = fixture();
        let innounp = write_script(fx.dir.path(), "innounp", FAKE_INNOUNP);
        let expected = fx.dir.path().join("expected.txt");
        fs::write(&expected, "# shipped\nLICENSE.txt\nREADME.md\nbin/app.exe\n").unwrap();

        scan(&fx)
            .env("INNOUNP_PATH", &innounp)
            .arg("--expected-paths")
            .arg(&expected)
            .arg("--fail-on-unsupported")
            .assert()
            .code(4);

        let report = read_json(&fx.output.join("scan-status.json"));
        assert_eq!(report["status"], "completed");
        assert_eq!(report["errors"][0]["code"], "CLASSIFICATION_GAP");
    }

    #[test]
    fn test_scan_timeout() {
        let fx = fixture();
        let innounp = write_script(fx.dir.path(), "innounp", "exec sleep 30\n");

        scan(&fx)
            .env("INNOUNP_PATH", &innounp)
            .args(["--timeout-seconds", "1"])
            .assert()
            .code(6)
            .stderr(predicate::str::contains("SCAN_FAILED"));

        let report = read_json(&fx.output.join("scan-status.json"));
        assert_eq!(report["status"], "failed");
        assert_eq!(report["errors"].as_array().unwrap().len(), 1);
        assert_eq!(report["errors"][0]["code"], "TIMEOUT");
    }

    #[test]
    fn test_scan_extractor_failure_is_mapped() {
        let fx = fixture();
        let innounp = write_script(
            fx.dir.path(),
            "innounp",
            "echo 'Error: unsupported compression method' >&2\nexit 1\n",
        );

        scan(&fx).env("INNOUNP_PATH", &innounp).assert().code(3);

        let report = read_json(&fx.output.join("scan-status.json"));
        assert_eq!(report["errors"][0]["code"], "UNSUPPORTED_COMPRESSION");
    }

    #[test]
    fn test_scan_without_any_extractor() {
        let fx = fixture();

        scan(&fx)
            .env_remove("INNOUNP_PATH")
            .env("PATH", &fx.empty_path)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("No extractor available"));

        let report = read_json(&fx.output.join("scan-status.json"));
        assert_eq!(report["status"], "failed");
        assert_eq!(report["errors"].as_array().unwrap().len(), 1);
        assert!(!fx.output.join("workspace").exists());
    }
}
