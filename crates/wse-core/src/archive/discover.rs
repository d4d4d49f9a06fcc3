//! Locate favorites archives under the user's home directory.
//!
//! Layout: `<home>/Library/Containers/com.tencent.xinWeChat/Data/Library/
//! Application Support/com.tencent.xinWeChat/<version>/<account>/Stickers/fav.archive`.

use std::path::{Path, PathBuf};
use thiserror::Error;

const CONTAINER_ROOT: &str =
    "Library/Containers/com.tencent.xinWeChat/Data/Library/Application Support/com.tencent.xinWeChat";

pub const ARCHIVE_FILE_NAME: &str = "fav.archive";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to determine user home directory")]
    NoHome,
    #[error("failed to find fav.archive: no match for pattern {}", .pattern.display())]
    NoArchives { pattern: PathBuf },
}

/// Human-readable search pattern, for messages.
pub fn search_pattern(home: &Path) -> PathBuf {
    home.join(CONTAINER_ROOT)
        .join("*")
        .join("*")
        .join("Stickers")
        .join(ARCHIVE_FILE_NAME)
}

/// Find every archive under `home`, sorted by path.
pub fn discover_archives(home: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = home.join(CONTAINER_ROOT);
    let mut found = Vec::new();
    for version in subdirs(&root) {
        for account in subdirs(&version) {
            let candidate = account.join("Stickers").join(ARCHIVE_FILE_NAME);
            if candidate.is_file() {
                found.push(candidate);
            }
        }
    }
    if found.is_empty() {
        return Err(DiscoveryError::NoArchives {
            pattern: search_pattern(home),
        });
    }
    found.sort();
    tracing::debug!(count = found.len(), "discovered archives");
    Ok(found)
}

/// [`discover_archives`] under the current user's home directory.
pub fn discover_default() -> Result<Vec<PathBuf>, DiscoveryError> {
    let home = home::home_dir().ok_or(DiscoveryError::NoHome)?;
    discover_archives(&home)
}

/// Subdirectories of `dir`; unreadable directories yield nothing.
fn subdirs(dir: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            tracing::warn!("cannot read {} while searching for archives: {}", dir.display(), e);
            Vec::new()
        }
    }
}
