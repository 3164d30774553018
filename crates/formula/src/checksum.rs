//! SHA-256 checksums for release archives.
//!
//! Covers hashing archive files directly and reading `sha256sum`-style
//! checksum files (`<hex>  <filename>`) produced next to them.

use crate::error::{Error, Result};
use crate::spec::is_sha256_hex;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Hex-encoded SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Computes the SHA-256 checksum of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn compute_sha256(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| {
        Error::checksum(
            format!("Failed to open file for checksum: {e}"),
            Some(path.to_path_buf()),
        )
    })?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    let mut total = 0usize;

    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| {
            Error::checksum(
                format!("Failed to read file for checksum: {e}"),
                Some(path.to_path_buf()),
            )
        })?;
        if bytes_read == 0 {
            break;
        }
        total += bytes_read;
        hasher.update(&buffer[..bytes_read]);
    }

    let digest = hex::encode(hasher.finalize());
    debug!(path = %path.display(), bytes = total, sha256 = %digest, "Computed checksum");
    Ok(digest)
}

/// Reads the digest from a checksum file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its first entry is not a
/// SHA-256 digest.
pub fn read_checksum_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io("reading checksum file", Some(path.to_path_buf()), e))?;
    parse_checksum_line(&content).map_err(|message| Error::checksum(message, Some(path.to_path_buf())))
}

/// Extracts the digest from the first non-blank line of `sha256sum` output.
///
/// Uppercase digests are normalized to lowercase.
///
/// # Errors
///
/// Returns a message describing why the content is not a checksum entry.
pub fn parse_checksum_line(content: &str) -> std::result::Result<String, String> {
    let line = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| "checksum file is empty".to_string())?;

    let digest = line
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if is_sha256_hex(&digest) {
        Ok(digest)
    } else {
        Err(format!("'{digest}' is not a 64-character hex SHA-256 digest"))
    }
}
