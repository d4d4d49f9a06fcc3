//! Fetch one sticker and persist it under the destination directory.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fetch::{extension_for, Fetcher, Transport};
use crate::retry::FetchError;
use crate::sticker::Sticker;
use crate::storage::{self, StorageError, FILE_MODE};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("sticker id cannot be empty")]
    EmptyId,
    #[error("sticker {id}: url cannot be empty")]
    EmptyUrl { id: String },
    #[error("failed to download sticker {id} to {}: {source}", .dir.display())]
    Fetch {
        id: String,
        dir: PathBuf,
        source: FetchError,
    },
    #[error("failed to write downloaded sticker {id} to {}: {source}", .path.display())]
    Write {
        id: String,
        path: PathBuf,
        source: StorageError,
    },
}

/// Download `sticker` into `dir` as `<id>.<ext>` and restore its timestamp.
///
/// Returns the sticker with its downloaded path set. A failure to restore
/// the timestamp is logged and does not fail the download.
pub fn download_sticker<T: Transport>(
    sticker: Sticker,
    fetcher: &Fetcher<T>,
    dir: &Path,
    fallback_extension: &str,
) -> Result<Sticker, DownloadError> {
    if sticker.id().is_empty() {
        return Err(DownloadError::EmptyId);
    }
    if sticker.url().is_empty() {
        return Err(DownloadError::EmptyUrl {
            id: sticker.id().to_string(),
        });
    }

    let content = fetcher
        .fetch(sticker.url())
        .map_err(|source| DownloadError::Fetch {
            id: sticker.id().to_string(),
            dir: dir.to_path_buf(),
            source,
        })?;

    let ext = extension_for(sticker.id(), &content, fallback_extension);
    let dest = dir.join(format!("{}.{}", sticker.id(), ext));
    storage::write_atomic(&dest, &content, FILE_MODE).map_err(|source| DownloadError::Write {
        id: sticker.id().to_string(),
        path: dest.clone(),
        source,
    })?;
    tracing::info!("sticker {}: downloaded to {}", sticker.id(), dest.display());

    if sticker.mtime().is_none() {
        tracing::warn!(
            "sticker {}: cannot determine mtime, setting mtime to posix epoch 0",
            sticker.id()
        );
    }
    if let Err(e) = storage::restore_times(&dest, sticker.mtime()) {
        tracing::error!("sticker {}: failed to set mtime on {}: {}", sticker.id(), dest.display(), e);
    }

    Ok(sticker.into_downloaded(dest))
}
