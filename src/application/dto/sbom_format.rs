/// SBOM document formats a scan can emit
///
/// Both the CLI and the formatter factory need this, so it lives in the
/// application layer rather than with either adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SbomFormat {
    /// SPDX 2.3 JSON
    Spdx,
    /// CycloneDX 1.6 JSON
    CycloneDx,
}

impl SbomFormat {
    /// Every supported format in emission order
    pub const ALL: [SbomFormat; 2] = [SbomFormat::Spdx, SbomFormat::CycloneDx];

    /// Parses a comma separated list such as `spdx,cyclonedx`
    ///
    /// Duplicates collapse; the result keeps first-seen order.
    pub fn parse_list(input: &str) -> Result<Vec<SbomFormat>, String> {
        let mut formats = Vec::new();
        for name in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let format: SbomFormat = name.parse()?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        if formats.is_empty() {
            return Err("At least one format must be specified (spdx, cyclonedx)".to_string());
        }
        Ok(formats)
    }
}

impl std::str::FromStr for SbomFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spdx" => Ok(SbomFormat::Spdx),
            "cyclonedx" | "cdx" => Ok(SbomFormat::CycloneDx),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'spdx' or 'cyclonedx'",
                s
            )),
        }
    }
}

impl std::fmt::Display for SbomFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SbomFormat::Spdx => write!(f, "spdx"),
            SbomFormat::CycloneDx => write!(f, "cyclonedx"),
        }
    }
}
