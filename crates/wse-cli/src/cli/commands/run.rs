//! `wse` – find archives, download new stickers, print what was written.

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use wse_core::archive::{self, DiscoveryError, PlutilDecoder};
use wse_core::config::WseConfig;
use wse_core::fetch::{CurlTransport, Fetcher};
use wse_core::pipeline::Pipeline;

/// Run one export. `archives` overrides discovery when non-empty.
/// Returns `Ok(true)` only if every step succeeded.
pub fn run_export(cfg: &WseConfig, archives: &[PathBuf], data_dir: PathBuf) -> Result<bool> {
    run_export_with(cfg, archives, data_dir, archive::discover_default)
}

/// [`run_export`] with the archive search supplied by the caller.
pub(crate) fn run_export_with<F>(
    cfg: &WseConfig,
    archives: &[PathBuf],
    data_dir: PathBuf,
    discover: F,
) -> Result<bool>
where
    F: FnOnce() -> Result<Vec<PathBuf>, DiscoveryError>,
{
    let mut ok = true;
    let archives = if archives.is_empty() {
        match discover() {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("{}", e);
                ok = false;
                Vec::new()
            }
        }
    } else {
        archives.to_vec()
    };

    let transport = CurlTransport::new(&cfg.http).context("failed to configure HTTP client")?;
    let fetcher = Fetcher::new(transport, cfg.retry.policy());
    let pipeline = Pipeline::new(PlutilDecoder, fetcher, data_dir)
        .with_fallback_extension(cfg.fallback_extension.clone());

    let report = pipeline.run(&archives)?;
    tracing::info!(
        archives = report.archives,
        failed_archives = report.failed_archives,
        existing = report.existing,
        found = report.found,
        skipped = report.skipped,
        downloaded = report.downloaded.len(),
        failed_downloads = report.failed_downloads,
        "run completed"
    );

    let paths: Vec<&Path> = report.downloaded_paths().collect();
    write_summary(&paths, &mut io::stdout().lock()).context("failed to write summary")?;
    Ok(ok && !report.has_failures())
}

/// Print the newly downloaded files, one per line.
pub(crate) fn write_summary<W: Write>(paths: &[&Path], out: &mut W) -> io::Result<()> {
    if paths.is_empty() {
        writeln!(out, "no new stickers downloaded")?;
        return Ok(());
    }
    writeln!(out, "downloaded {} new stickers:", paths.len())?;
    for path in paths {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}
