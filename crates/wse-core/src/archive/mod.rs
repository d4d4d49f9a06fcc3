//! Favorites archive access: locating archive files, converting them to XML,
//! and pulling out the flat list of string entries.

mod discover;
mod nodes;

pub use discover::{
    discover_archives, discover_default, search_pattern, DiscoveryError, ARCHIVE_FILE_NAME,
};
pub use nodes::string_nodes;

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Directory next to an archive holding the encrypted sticker copies.
pub const PERSISTENCE_DIR: &str = "Persistence";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read archive {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to run plutil on {path}: {source}")]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("plutil -convert xml1 -o - {path} failed ({status}): {stderr}")]
    Convert {
        path: PathBuf,
        status: String,
        stderr: String,
    },
    #[error("archive XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("failed to parse archive XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("archive XML root is <{0}>, expected <plist>")]
    NotPlist(String),
}

/// Turns an archive file into its XML property-list form.
pub trait ArchiveDecoder {
    fn decode(&self, path: &Path) -> Result<Vec<u8>, DecodeError>;
}

/// Decoder backed by macOS `plutil`. Files that are already XML plists are
/// passed through unchanged, so pre-converted archives work anywhere.
#[derive(Debug, Clone, Default)]
pub struct PlutilDecoder;

impl ArchiveDecoder for PlutilDecoder {
    fn decode(&self, path: &Path) -> Result<Vec<u8>, DecodeError> {
        let raw = std::fs::read(path).map_err(|source| DecodeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if looks_like_xml(&raw) {
            tracing::debug!(path = %path.display(), "archive is already XML");
            return Ok(raw);
        }

        let output = Command::new("plutil")
            .args(["-convert", "xml1", "-o", "-"])
            .arg(path)
            .output()
            .map_err(|source| DecodeError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;
        if !output.status.success() {
            return Err(DecodeError::Convert {
                path: path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

fn looks_like_xml(data: &[u8]) -> bool {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let data = &data[start..];
    data.starts_with(b"<?xml") || data.starts_with(b"<plist")
}

/// Where the encrypted copies referenced by `archive` are expected.
pub fn reference_dir(archive: &Path) -> PathBuf {
    archive
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(PERSISTENCE_DIR)
}
