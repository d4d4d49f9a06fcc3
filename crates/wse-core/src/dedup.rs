//! Skip stickers whose id already has a file in the destination directory.
//!
//! The destination directory is the only record of past runs: every file
//! named `<id>.<ext>` counts as downloaded. Nothing else is persisted, so
//! the set can always be rebuilt by rescanning.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

use crate::sticker::Sticker;

static FILENAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9a-f]+)\.[0-9a-z]+$").unwrap());

/// Ids already materialized in the destination directory. Read-only once scanned.
#[derive(Debug, Clone, Default)]
pub struct ExistingIds {
    ids: HashSet<String>,
}

impl ExistingIds {
    /// Scan `dir` for files named `<id>.<ext>`.
    pub fn scan(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to read data dir {} for existing entries", dir.display()))?;
        let mut ids = HashSet::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
            let name = entry.file_name();
            if let Some(id) = name.to_str().and_then(id_from_filename) {
                ids.insert(id.to_string());
            }
        }
        tracing::debug!(count = ids.len(), dir = %dir.display(), "scanned existing stickers");
        Ok(Self { ids })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<String> for ExistingIds {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Extract `<id>` from a destination filename `<id>.<ext>`.
pub fn id_from_filename(name: &str) -> Option<&str> {
    FILENAME_PATTERN
        .captures(name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Result of filtering: stickers to download and how many were skipped.
#[derive(Debug, Default)]
pub struct Filtered {
    pub pending: Vec<Sticker>,
    pub skipped: usize,
}

/// Drop stickers already on disk, and repeats of an id seen earlier in
/// `stickers`. Order of the survivors is preserved.
pub fn filter(stickers: Vec<Sticker>, existing: &ExistingIds) -> Filtered {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Filtered::default();
    for s in stickers {
        if existing.contains(s.id()) {
            tracing::info!("sticker {} already downloaded", s.id());
            out.skipped += 1;
            continue;
        }
        if !seen.insert(s.id().to_string()) {
            tracing::info!("sticker {} listed more than once, skipping repeat", s.id());
            out.skipped += 1;
            continue;
        }
        out.pending.push(s);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sticker(id: &str) -> Sticker {
        Sticker::candidate(id.into(), format!("http://x/{}", id), PathBuf::from(id))
    }

    #[test]
    fn filename_pattern_extracts_id() {
        assert_eq!(id_from_filename("deadbeef.gif"), Some("deadbeef"));
        assert_eq!(id_from_filename("0a1b.png"), Some("0a1b"));
        assert_eq!(id_from_filename("Deadbeef.gif"), None);
        assert_eq!(id_from_filename("deadbeef"), None);
        assert_eq!(id_from_filename("deadbeef.gif.Xy12zQ"), None);
        assert_eq!(id_from_filename(".gif"), None);
    }

    #[test]
    fn scan_collects_matching_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("aa.gif"), b"").unwrap();
        std::fs::write(dir.path().join("bb.jpg"), b"").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"").unwrap();
        std::fs::write(dir.path().join("cc.png.a8Kz01"), b"").unwrap();
        let ids = ExistingIds::scan(dir.path()).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("aa"));
        assert!(ids.contains("bb"));
        assert!(!ids.contains("cc"));
    }

    #[test]
    fn scan_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ExistingIds::scan(&dir.path().join("nope")).is_err());
    }

    #[test]
    fn filter_skips_known_and_repeated_ids() {
        let existing: ExistingIds = ["bb".to_string()].into_iter().collect();
        let got = filter(
            vec![sticker("aa"), sticker("bb"), sticker("cc"), sticker("aa")],
            &existing,
        );
        let ids: Vec<&str> = got.pending.iter().map(|s| s.id()).collect();
        assert_eq!(ids, ["aa", "cc"]);
        assert_eq!(got.skipped, 2);
    }
}
