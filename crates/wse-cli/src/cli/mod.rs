//! CLI for the WSE sticker exporter.

mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use wse_core::{config, logging};

use commands::run_export;

/// Export favorited stickers to a local directory. Run without flags to
/// search the default archive locations.
#[derive(Debug, Parser)]
#[command(name = "wse")]
#[command(about = "WSE: export favorited stickers to a local directory", long_about = None)]
pub struct Cli {
    /// Destination directory (overrides `data_dir` in the config).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Read this archive instead of searching for archives. Repeatable.
    #[arg(long = "archive", value_name = "PATH")]
    pub archives: Vec<PathBuf>,

    /// Config file to use instead of `~/.config/wse/config.toml`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse arguments, set up logging, and run the export.
    /// Returns `Ok(false)` when the run finished with failures.
    pub fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        logging::init_logging(cfg.log_to_file);
        tracing::debug!("loaded config: {:?}", cfg);

        let data_dir = match cli.data_dir {
            Some(dir) => dir,
            None => cfg.resolve_data_dir()?,
        };
        run_export(&cfg, &cli.archives, data_dir)
    }
}
