//! Recover a sticker's creation time from its encrypted local copy.

use std::path::Path;
use std::time::SystemTime;

use crate::sticker::Sticker;

/// Modification time of the file at `path`, or `None` (with a warning) if it
/// cannot be stat'd.
pub fn reference_mtime(path: &Path) -> Option<SystemTime> {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::warn!("failed to stat {}, cannot determine mtime: {}", path.display(), e);
            None
        }
    }
}

/// Attach the reference artifact's mtime to a freshly correlated sticker.
pub fn resolve(sticker: Sticker) -> Sticker {
    let mtime = reference_mtime(sticker.reference_path());
    sticker.with_mtime(mtime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::FileTime;
    use std::time::Duration;

    #[test]
    fn resolves_mtime_of_existing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc123");
        std::fs::write(&path, b"encrypted").unwrap();
        filetime::set_file_mtime(&path, FileTime::from_unix_time(1_600_000_000, 0)).unwrap();

        let s = Sticker::candidate("abc123".into(), "http://x/1".into(), path);
        let s = resolve(s);
        assert_eq!(
            s.mtime(),
            Some(SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000))
        );
    }

    #[test]
    fn missing_artifact_leaves_mtime_unset() {
        let dir = tempfile::tempdir().unwrap();
        let s = Sticker::candidate(
            "abc123".into(),
            "http://x/1".into(),
            dir.path().join("missing"),
        );
        let s = resolve(s);
        assert!(s.mtime().is_none());
        assert_eq!(s.id(), "abc123");
    }
}
