//! Configuration file support for inno-sbom.
//!
//! Provides YAML-based configuration through `inno-sbom.config.yml` files,
//! including data structures, file loading, and validation. Also loads the
//! newline-separated expected-path allow-list.

use anyhow::Context;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use inno_sbom::application::dto::SbomFormat;
use inno_sbom::sbom_generation::domain::{normalize_install_path, CoverageThresholds};
use inno_sbom::shared::error::SbomError;
use inno_sbom::shared::Result;

const CONFIG_FILENAME: &str = "inno-sbom.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub formats: Option<Vec<String>>,
    pub timeout_seconds: Option<u64>,
    pub fail_on_unsupported: Option<bool>,
    pub retain_workspace: Option<bool>,
    pub expected_paths: Option<Vec<String>>,
    pub coverage_thresholds: Option<ThresholdsConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Coverage percentages a completed scan must reach; omitted keys keep their defaults.
#[derive(Debug, Deserialize, Default, Clone, Copy)]
pub struct ThresholdsConfig {
    pub extracted: Option<u32>,
    pub classified: Option<u32>,
    pub metadata_complete: Option<u32>,
}

impl ThresholdsConfig {
    /// Overlays the configured values on the built-in defaults
    ///
    /// Values were range-checked by `load_config_from_path`.
    pub fn to_thresholds(self) -> CoverageThresholds {
        let defaults = CoverageThresholds::default();
        let pick = |value: Option<u32>, default: u8| {
            value.map_or(default, |v| v.min(100) as u8)
        };
        CoverageThresholds {
            extracted: pick(self.extracted, defaults.extracted),
            classified: pick(self.classified, defaults.classified),
            metadata_complete: pick(self.metadata_complete, defaults.metadata_complete),
        }
    }
}

impl ConfigFile {
    /// Parsed `formats`, if configured
    pub fn parsed_formats(&self) -> Result<Option<Vec<SbomFormat>>> {
        match &self.formats {
            None => Ok(None),
            Some(names) => SbomFormat::parse_list(&names.join(","))
                .map(Some)
                .map_err(|e| anyhow::anyhow!("Invalid config: formats: {}", e)),
        }
    }

    /// Normalized `expected_paths`, if configured
    pub fn expected_path_set(&self) -> Option<HashSet<String>> {
        self.expected_paths
            .as_ref()
            .map(|paths| paths.iter().map(|p| normalize_install_path(p.trim())).collect())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Reads a newline-separated allow-list of install paths.
///
/// Blank lines and lines starting with `#` are skipped; each entry is
/// normalized the same way extracted paths are.
pub fn load_expected_paths(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read expected paths file: {}\n\n💡 Hint: Pass a text file with one install path per line.",
            path.display()
        )
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(normalize_install_path)
        .collect())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.timeout_seconds == Some(0) {
        return Err(SbomError::Validation {
            message: "timeout_seconds must be greater than 0.\n\n\
                      💡 Hint: Use a positive number of seconds (default is 900)."
                .to_string(),
        }
        .into());
    }

    if let Some(thresholds) = config.coverage_thresholds {
        for (name, value) in [
            ("extracted", thresholds.extracted),
            ("classified", thresholds.classified),
            ("metadata_complete", thresholds.metadata_complete),
        ] {
            if let Some(value) = value {
                if value > 100 {
                    return Err(SbomError::Validation {
                        message: format!(
                            "coverage_thresholds.{} must be between 0 and 100, got {}.\n\n\
                             💡 Hint: Coverage is reported as 0 or 100.",
                            name, value
                        ),
                    }
                    .into());
                }
            }
        }
    }

    config.parsed_formats()?;
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
