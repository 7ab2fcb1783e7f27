//! Streaming content hashing for extracted files.

use crate::shared::Result;
use anyhow::Context;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Hex-encoded content digest of a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentHash {
    pub algorithm: &'static str,
    pub hash: String,
    /// Number of bytes hashed
    pub size_bytes: u64,
}

/// Computes the SHA-256 digest of a file, reading it in fixed-size chunks
///
/// # Errors
/// Returns an error if the file cannot be opened or a read fails mid-stream.
pub fn compute_content_hash(path: &Path) -> Result<ContentHash> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    let mut size_bytes = 0u64;

    loop {
        let read = file
            .read(&mut buffer)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
        size_bytes += read as u64;
    }

    Ok(ContentHash {
        algorithm: "sha256",
        hash: hex::encode(hasher.finalize()),
        size_bytes,
    })
}
