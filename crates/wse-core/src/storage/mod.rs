//! Disk persistence for downloaded stickers.
//!
//! Content is written to a uniquely named temp file next to the destination,
//! synced, closed, then renamed over the destination. The temp file lives in
//! the same directory so the rename never crosses filesystems. Readers see
//! either the old file or the complete new one.

use filetime::FileTime;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Permissions applied to finished files (Unix only).
pub const FILE_MODE: u32 = 0o644;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create temp file in {dir}: {source}")]
    CreateTemp { dir: PathBuf, source: io::Error },
    #[error("failed to write temp file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to chmod temp file {path} to {mode:o}: {source}")]
    Chmod {
        path: PathBuf,
        mode: u32,
        source: io::Error,
    },
    #[error("failed to sync temp file {path}: {source}")]
    Sync { path: PathBuf, source: io::Error },
    #[error("failed to rename temp file {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

/// Temp file name prefix: the final file name plus a dot (e.g. `ab.gif.`).
/// A random suffix is appended on creation.
pub fn temp_prefix(final_path: &Path) -> OsString {
    let mut o = final_path.file_name().unwrap_or_default().to_owned();
    o.push(".");
    o
}

/// Atomically replace `final_path` with `data`.
///
/// On any error before the rename the temp file is removed; on success only
/// `final_path` remains.
pub fn write_atomic(final_path: &Path, data: &[u8], mode: u32) -> Result<(), StorageError> {
    let dir = match final_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Dropping `tmp` on an early return deletes the temp file.
    let mut tmp = tempfile::Builder::new()
        .prefix(&temp_prefix(final_path))
        .tempfile_in(dir)
        .map_err(|source| StorageError::CreateTemp {
            dir: dir.to_path_buf(),
            source,
        })?;
    let tmp_path = tmp.path().to_path_buf();

    tmp.write_all(data).map_err(|source| StorageError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    set_mode(tmp.as_file(), mode).map_err(|source| StorageError::Chmod {
        path: tmp_path.clone(),
        mode,
        source,
    })?;
    tmp.as_file()
        .sync_all()
        .map_err(|source| StorageError::Sync {
            path: tmp_path.clone(),
            source,
        })?;

    // Close the handle first, then rename; a failed rename drops the path and removes the file.
    tmp.into_temp_path()
        .persist(final_path)
        .map_err(|e| StorageError::Rename {
            from: tmp_path,
            to: final_path.to_path_buf(),
            source: e.error,
        })?;
    Ok(())
}

#[cfg(unix)]
fn set_mode(file: &std::fs::File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &std::fs::File, _mode: u32) -> io::Result<()> {
    Ok(())
}

/// Set both access and modification time of `path` to `mtime`, or to the
/// Unix epoch when it is unknown.
pub fn restore_times(path: &Path, mtime: Option<SystemTime>) -> io::Result<()> {
    let ft = mtime
        .map(FileTime::from_system_time)
        .unwrap_or_else(FileTime::zero);
    filetime::set_file_times(path, ft, ft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn temp_prefix_uses_final_name() {
        assert_eq!(temp_prefix(Path::new("/tmp/ab.gif")), OsString::from("ab.gif."));
        assert_eq!(temp_prefix(Path::new("cd.png")), OsString::from("cd.png."));
    }

    #[test]
    fn write_leaves_only_final_file() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("ab.gif");
        write_atomic(&final_path, b"GIF89a-data", FILE_MODE).unwrap();
        assert_eq!(std::fs::read(&final_path).unwrap(), b"GIF89a-data");
        assert_eq!(entries(dir.path()), ["ab.gif"]);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&final_path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, FILE_MODE);
        }
    }

    #[test]
    fn overwrite_replaces_complete_content() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("ab.png");
        std::fs::write(&final_path, b"old content that is longer").unwrap();
        write_atomic(&final_path, b"new", FILE_MODE).unwrap();
        assert_eq!(std::fs::read(&final_path).unwrap(), b"new");
        assert_eq!(entries(dir.path()), ["ab.png"]);
    }

    #[test]
    fn failed_rename_keeps_previous_content_and_cleans_temp() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the destination makes the rename fail.
        let final_path = dir.path().join("ab.gif");
        std::fs::create_dir(&final_path).unwrap();
        std::fs::write(final_path.join("keep"), b"x").unwrap();

        let err = write_atomic(&final_path, b"payload", FILE_MODE).unwrap_err();
        assert!(matches!(err, StorageError::Rename { .. }));
        assert_eq!(entries(dir.path()), ["ab.gif"]);
        assert_eq!(std::fs::read(final_path.join("keep")).unwrap(), b"x");
    }

    #[test]
    fn missing_directory_fails_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("missing").join("ab.gif");
        let err = write_atomic(&final_path, b"payload", FILE_MODE).unwrap_err();
        assert!(matches!(err, StorageError::CreateTemp { .. }));
        assert!(entries(dir.path()).is_empty());
    }

    #[test]
    fn restore_times_sets_atime_and_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ab.gif");
        std::fs::write(&path, b"x").unwrap();
        let t = SystemTime::UNIX_EPOCH + Duration::from_secs(1_500_000_000);
        restore_times(&path, Some(t)).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta), FileTime::from_system_time(t));
        assert_eq!(FileTime::from_last_access_time(&meta), FileTime::from_system_time(t));

        restore_times(&path, None).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta).unix_seconds(), 0);
    }

    #[test]
    fn restore_times_on_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(restore_times(&dir.path().join("nope"), None).is_err());
    }
}
