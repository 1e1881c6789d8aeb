//! Atomic file replacement

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename: the temporary file is created next to the
/// target so the final rename never crosses a filesystem boundary. Until the
/// rename succeeds the original file is left untouched.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    write_atomic_with(path, |file| file.write_all(content))
}

/// Like [`write_atomic`], but lets the caller stream into the temporary file.
///
/// If `fill` fails the temporary file is removed and the target is not
/// replaced.
pub fn write_atomic_with<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    let target = resolve_target(path)?;
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

    let prefix = format!(
        ".{}-",
        target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default()
    );
    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|e| Error::io(&dir, e))?;

    fill(temp.as_file_mut()).map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path(), e))?;

    // Temp files are created 0600; keep the mode the target already had.
    if let Ok(metadata) = fs::metadata(&target) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| Error::io(temp.path(), e))?;
    }

    let temp_path = temp.path().to_path_buf();
    temp.persist(&target).map_err(|e| Error::Replace {
        path: target.clone(),
        temp: temp_path,
        source: e.error,
    })?;

    tracing::debug!(path = %target.display(), "Replaced file atomically");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Resolve symlinks so the real file is replaced, not the link.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return dunce::canonicalize(path).map_err(|e| Error::io(path, e));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_target_missing_file_is_unchanged() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.conf");
        assert_eq!(resolve_target(&path).unwrap(), path);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_target_follows_symlink() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real.conf");
        fs::write(&real, "a=1\n").unwrap();
        let link = temp.path().join("link.conf");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let resolved = resolve_target(&link).unwrap();
        assert_eq!(resolved, fs::canonicalize(&real).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_through_symlink_keeps_link() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real.conf");
        fs::write(&real, "old\n").unwrap();
        let link = temp.path().join("link.conf");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_atomic(&link, b"new\n").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "new\n");
    }
}
