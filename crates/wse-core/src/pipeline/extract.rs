//! Per-archive extraction: decode, correlate, resolve timestamps.

use std::path::{Path, PathBuf};

use crate::archive::{reference_dir, string_nodes, ArchiveDecoder, DecodeError};
use crate::correlate::{candidates, correlate};
use crate::sticker::Sticker;
use crate::timestamp;

/// Stickers found in one archive, each with its timestamp resolved.
pub fn extract_archive<D: ArchiveDecoder + ?Sized>(
    decoder: &D,
    archive: &Path,
) -> Result<Vec<Sticker>, DecodeError> {
    let xml = decoder.decode(archive)?;
    let nodes = string_nodes(&xml)?;
    let stickers = candidates(correlate(&nodes), &reference_dir(archive));
    tracing::debug!(archive = %archive.display(), nodes = nodes.len(), stickers = stickers.len(), "extracted");
    Ok(stickers.into_iter().map(timestamp::resolve).collect())
}

/// Stickers from all archives plus how many archives could not be read.
#[derive(Debug, Default)]
pub struct Collected {
    pub stickers: Vec<Sticker>,
    pub failed_archives: usize,
}

/// Extract every archive in turn. A bad archive is logged and counted; the
/// rest are still processed.
pub fn collect_stickers<D: ArchiveDecoder + ?Sized>(decoder: &D, archives: &[PathBuf]) -> Collected {
    let mut out = Collected::default();
    for archive in archives {
        match extract_archive(decoder, archive) {
            Ok(stickers) => out.stickers.extend(stickers),
            Err(e) => {
                tracing::error!("failed to extract stickers from {}: {}", archive.display(), e);
                out.failed_archives += 1;
            }
        }
    }
    if out.failed_archives > 0 {
        tracing::error!(
            "failed to extract stickers from {}/{} archive file(s)",
            out.failed_archives,
            archives.len()
        );
    }
    out
}
