//! Ordered license-recognition table.
//!
//! Each row pairs an SPDX id with two expressions: `text` recognizes the
//! license in a full license document, `hint` recognizes a short mention in a
//! file name or evidence summary (`LICENSE-MIT`, `apache-2.0.txt`). Rows are
//! tried top to bottom and the first match wins, so narrower licenses (LGPL)
//! sit above the ones whose phrasing they contain (GPL).

use regex::Regex;
use std::sync::OnceLock;

/// Table rows: (SPDX id, full-text pattern, name-hint pattern)
const BUILTIN_PATTERNS: &[(&str, &str, &str)] = &[
    (
        "Apache-2.0",
        r"apache license,?\s+version 2\.0",
        r"\bapache[-_ ]?(license[-_ ]?)?v?2(\.0)?\b",
    ),
    ("MIT", r"\bmit license\b", r"\bmit\b"),
    (
        "BSD-3-Clause",
        r"bsd 3[- ]clause|redistributions of source code must retain(?s:.*)neither the name",
        r"\bbsd[-_ ]?3",
    ),
    ("BSD-2-Clause", r"bsd 2[- ]clause", r"\bbsd[-_ ]?2"),
    (
        "LGPL-3.0-only",
        r"(?s)gnu lesser general public license.*version 3",
        r"\blgpl[-_ ]?v?3",
    ),
    (
        "LGPL-2.1-only",
        r"(?s)gnu lesser general public license.*version 2\.1",
        r"\blgpl[-_ ]?v?2\.1",
    ),
    (
        "GPL-3.0-only",
        r"(?s)gnu general public license.*version 3",
        r"\bgpl[-_ ]?v?3",
    ),
    (
        "GPL-2.0-only",
        r"(?s)gnu general public license.*version 2",
        r"\bgpl[-_ ]?v?2",
    ),
    (
        "MPL-2.0",
        r"(?s)mozilla public license.*2\.0",
        r"\bmpl[-_ ]?v?2",
    ),
    (
        "EPL-2.0",
        r"(?s)eclipse public license.*2\.0",
        r"\bepl[-_ ]?v?2",
    ),
    ("Unlicense", r"the unlicense|unlicense\.org", r"\bunlicense\b"),
    (
        "CC0-1.0",
        r"cc0[- ]1\.0|creative commons zero|creative commons legal code\s+cc0",
        r"\bcc0\b",
    ),
    (
        "CC-BY-4.0",
        r"cc by 4\.0|creative commons attribution 4\.0",
        r"\bcc[-_ ]by[-_ ]4",
    ),
    ("ISC", r"\bisc license\b", r"\bisc\b"),
];

/// One recognizable license
#[derive(Debug)]
pub struct LicensePattern {
    spdx_id: &'static str,
    text: Regex,
    hint: Regex,
}

impl LicensePattern {
    pub fn spdx_id(&self) -> &'static str {
        self.spdx_id
    }
}

/// Ordered list of [`LicensePattern`]s; matching is case-insensitive
#[derive(Debug)]
pub struct LicensePatternTable {
    patterns: Vec<LicensePattern>,
}

impl LicensePatternTable {
    /// Builds a table from `(spdx_id, text, hint)` rows
    ///
    /// # Errors
    /// Returns an error naming the row whose expression does not compile
    pub fn from_rows(rows: &[(&'static str, &str, &str)]) -> Result<Self, regex::Error> {
        let patterns = rows
            .iter()
            .map(|&(spdx_id, text, hint)| {
                Ok(LicensePattern {
                    spdx_id,
                    text: Regex::new(&format!("(?i){}", text))?,
                    hint: Regex::new(&format!("(?i){}", hint))?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { patterns })
    }

    /// The built-in table, compiled once per process
    pub fn builtin() -> &'static LicensePatternTable {
        static TABLE: OnceLock<LicensePatternTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            Self::from_rows(BUILTIN_PATTERNS).expect("built-in license patterns must compile")
        })
    }

    /// First license whose full-text pattern occurs in `contents`
    pub fn match_text(&self, contents: &str) -> Option<&'static str> {
        self.patterns
            .iter()
            .find(|p| p.text.is_match(contents))
            .map(|p| p.spdx_id)
    }

    /// First license whose short-form hint occurs in `hint`
    pub fn match_hint(&self, hint: &str) -> Option<&'static str> {
        self.patterns
            .iter()
            .find(|p| p.hint.is_match(hint))
            .map(|p| p.spdx_id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LicensePattern> {
        self.patterns.iter()
    }
}
