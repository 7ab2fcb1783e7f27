//! Install path normalization and deterministic file identity.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Number of hex characters kept from the identity digest
pub const FILE_ID_WIDTH: usize = 16;

/// Stable identifier of an extracted file, derived from its install path and content hash
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a path to the POSIX-like form used in SBOM output
///
/// Backslashes become `/`, runs of separators collapse to one, and a single
/// leading `/` is removed. Applying it twice gives the same result as once.
pub fn normalize_install_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut previous_was_separator = false;

    for c in path.chars() {
        let is_separator = c == '/' || c == '\\';
        if is_separator && previous_was_separator {
            continue;
        }
        normalized.push(if is_separator { '/' } else { c });
        previous_was_separator = is_separator;
    }

    match normalized.strip_prefix('/') {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}

/// Derives the file id: SHA-256 of `normalize(install_path) + ":" + hash`, truncated
///
/// Truncation collisions are not detected.
pub fn derive_file_id(install_path: &str, hash: &str) -> FileId {
    let material = format!("{}:{}", normalize_install_path(install_path), hash);
    let digest = hex::encode(Sha256::digest(material.as_bytes()));
    FileId(digest[..FILE_ID_WIDTH].to_string())
}

/// Directory part of a normalized install path ("" for files at the root)
pub fn parent_dir(install_path: &str) -> &str {
    match install_path.rfind('/') {
        Some(idx) => &install_path[..idx],
        None => "",
    }
}

/// Final component of a normalized install path
pub fn base_name(install_path: &str) -> &str {
    match install_path.rfind('/') {
        Some(idx) => &install_path[idx + 1..],
        None => install_path,
    }
}
