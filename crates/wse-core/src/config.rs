use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per sticker (including the first).
    pub max_attempts: u32,
    /// Fixed delay in seconds between attempts (e.g. 0.5 = 500ms).
    pub delay_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_secs: 3.0,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            delay: Duration::from_secs_f64(self.delay_secs.max(0.0)),
        }
    }
}

/// HTTP client timeouts (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Bound on TCP connect plus TLS handshake.
    pub connect_timeout_secs: u64,
    /// Abort when no bytes arrive for this long (covers the wait for response headers).
    pub stall_timeout_secs: u64,
    /// Bound on the whole request.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            stall_timeout_secs: 5,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/wse/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WseConfig {
    /// Destination directory for downloaded stickers. Defaults to `~/.local/share/wse/stickers`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Extension used when the payload is not a recognized image type.
    #[serde(default = "default_fallback_extension")]
    pub fallback_extension: String,
    /// Log to `~/.local/state/wse/wse.log` instead of stderr.
    #[serde(default)]
    pub log_to_file: bool,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_fallback_extension() -> String {
    "png".to_string()
}

impl Default for WseConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            fallback_extension: default_fallback_extension(),
            log_to_file: false,
            retry: RetryConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl WseConfig {
    /// Destination directory: configured value, else the XDG data dir.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("wse")?;
        Ok(xdg_dirs.get_data_home().join("stickers"))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wse")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from the default location, creating a default file if none exists.
pub fn load_or_init() -> Result<WseConfig> {
    load_or_init_at(&config_path()?)
}

/// Load configuration from `path`, creating a default file there if none exists.
pub fn load_or_init_at(path: &Path) -> Result<WseConfig> {
    if !path.exists() {
        let default_cfg = WseConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("failed to write default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: WseConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
