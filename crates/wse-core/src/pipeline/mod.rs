//! Run orchestration: archives in, files on disk out.
//!
//! Flow per run: scan the destination for known ids, extract stickers from
//! each archive, sort everything by creation time (oldest first), drop known
//! and repeated ids, then fetch and write the rest one at a time. Per-archive
//! and per-sticker failures are counted in the [`RunReport`], never raised.

mod download;
mod extract;

pub use download::{download_sticker, DownloadError};
pub use extract::{collect_stickers, extract_archive, Collected};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::archive::ArchiveDecoder;
use crate::dedup::{self, ExistingIds};
use crate::fetch::{Fetcher, Transport};
use crate::sticker::Sticker;

/// Outcome of one run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Archives handed to the run.
    pub archives: usize,
    /// Archives that could not be decoded or parsed.
    pub failed_archives: usize,
    /// Stickers already in the destination directory before the run.
    pub existing: usize,
    /// Stickers correlated across all archives.
    pub found: usize,
    /// Stickers skipped as already downloaded or repeated.
    pub skipped: usize,
    /// Stickers written this run, in the order they were processed.
    pub downloaded: Vec<Sticker>,
    /// Stickers whose fetch or write failed.
    pub failed_downloads: usize,
}

impl RunReport {
    /// Any archive or sticker failed, regardless of how many succeeded.
    pub fn has_failures(&self) -> bool {
        self.failed_archives > 0 || self.failed_downloads > 0
    }

    pub fn downloaded_paths(&self) -> impl Iterator<Item = &Path> {
        self.downloaded.iter().filter_map(|s| s.downloaded_path())
    }
}

/// Sequential sticker export pipeline.
pub struct Pipeline<D, T> {
    decoder: D,
    fetcher: Fetcher<T>,
    data_dir: PathBuf,
    fallback_extension: String,
}

impl<D: ArchiveDecoder, T: Transport> Pipeline<D, T> {
    pub fn new(decoder: D, fetcher: Fetcher<T>, data_dir: PathBuf) -> Self {
        Self {
            decoder,
            fetcher,
            data_dir,
            fallback_extension: "png".to_string(),
        }
    }

    pub fn with_fallback_extension(mut self, ext: impl Into<String>) -> Self {
        self.fallback_extension = ext.into();
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn fetcher(&self) -> &Fetcher<T> {
        &self.fetcher
    }

    /// Process `archives` end to end.
    ///
    /// Errors only when the destination directory cannot be created or
    /// scanned; everything else is recorded in the report.
    pub fn run(&self, archives: &[PathBuf]) -> Result<RunReport> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("failed to create directory {}", self.data_dir.display()))?;
        let existing = ExistingIds::scan(&self.data_dir)?;
        if !existing.is_empty() {
            tracing::info!(
                "{} sticker(s) already in {}",
                existing.len(),
                self.data_dir.display()
            );
        }

        let Collected {
            mut stickers,
            failed_archives,
        } = collect_stickers(&self.decoder, archives);
        let found = stickers.len();

        // Unknown times sort first; the sort is stable so archive order breaks ties.
        stickers.sort_by_key(|s| s.mtime());
        let filtered = dedup::filter(stickers, &existing);

        let mut report = RunReport {
            archives: archives.len(),
            failed_archives,
            existing: existing.len(),
            found,
            skipped: filtered.skipped,
            ..RunReport::default()
        };

        for sticker in filtered.pending {
            match download_sticker(sticker, &self.fetcher, &self.data_dir, &self.fallback_extension) {
                Ok(done) => report.downloaded.push(done),
                Err(e) => {
                    tracing::error!("{}", e);
                    report.failed_downloads += 1;
                }
            }
        }
        if report.failed_downloads > 0 {
            tracing::error!("failed to download {} sticker(s)", report.failed_downloads);
        }
        Ok(report)
    }
}
