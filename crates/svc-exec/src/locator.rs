//! Executable lookup

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolves tool names to absolute paths.
pub trait ToolLocator: Send + Sync {
    /// Return the path of `name`, or `None` when it is not installed.
    fn locate(&self, name: &str) -> Option<PathBuf>;
}

/// [`ToolLocator`] that searches a list of directories.
///
/// Built from `PATH` followed by extra directories, so that tools living in
/// `/sbin` or `/usr/sbin` are found even when the caller's `PATH` omits them.
#[derive(Debug, Clone)]
pub struct PathLocator {
    search_path: OsString,
    cwd: PathBuf,
}

impl PathLocator {
    /// Search `PATH`, then each of `extra_dirs`.
    pub fn new(extra_dirs: &[PathBuf]) -> Self {
        let mut dirs: Vec<PathBuf> = std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default();
        for dir in extra_dirs {
            if !dirs.contains(dir) {
                dirs.push(dir.clone());
            }
        }
        Self::with_dirs(&dirs)
    }

    /// Search exactly `dirs`, in order.
    pub fn with_dirs(dirs: &[PathBuf]) -> Self {
        let search_path = std::env::join_paths(dirs).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unusable search directories: {}", e);
            OsString::new()
        });
        Self {
            search_path,
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
        }
    }

    /// The directories searched, joined like `PATH`.
    pub fn search_path(&self) -> &OsString {
        &self.search_path
    }
}

impl ToolLocator for PathLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        match which::which_in(name, Some(&self.search_path), Path::new(&self.cwd)) {
            Ok(path) => {
                tracing::debug!(tool = name, path = %path.display(), "Located tool");
                Some(path)
            }
            Err(_) => {
                tracing::debug!(tool = name, "Tool not found");
                None
            }
        }
    }
}
