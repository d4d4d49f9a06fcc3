//! The sticker record and its identity rules.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-f]+$").unwrap());
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").unwrap());

/// True if `s` is a lowercase hex sticker id.
pub fn is_valid_id(s: &str) -> bool {
    ID_PATTERN.is_match(s)
}

/// True if `s` looks like an HTTP(S) URL.
pub fn is_url(s: &str) -> bool {
    URL_PATTERN.is_match(s)
}

/// One downloadable sticker.
///
/// Built by the correlator, given its timestamp once by the timestamp
/// resolver, and otherwise only changed by recording where it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sticker {
    id: String,
    url: String,
    reference_path: PathBuf,
    mtime: Option<SystemTime>,
    downloaded_path: Option<PathBuf>,
}

impl Sticker {
    pub(crate) fn candidate(id: String, url: String, reference_path: PathBuf) -> Self {
        Self {
            id,
            url,
            reference_path,
            mtime: None,
            downloaded_path: None,
        }
    }

    /// Attach the resolved timestamp. Consumes the candidate so the time is set exactly once.
    pub(crate) fn with_mtime(self, mtime: Option<SystemTime>) -> Self {
        Self { mtime, ..self }
    }

    pub(crate) fn into_downloaded(self, path: PathBuf) -> Self {
        Self {
            downloaded_path: Some(path),
            ..self
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Where the encrypted local copy is expected; only its mtime is read.
    pub fn reference_path(&self) -> &Path {
        &self.reference_path
    }

    /// `None` when the reference artifact could not be stat'd.
    pub fn mtime(&self) -> Option<SystemTime> {
        self.mtime
    }

    /// Set only after a successful write.
    pub fn downloaded_path(&self) -> Option<&Path> {
        self.downloaded_path.as_deref()
    }
}
