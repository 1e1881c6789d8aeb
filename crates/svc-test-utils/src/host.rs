//! [`TestHost`] and [`StaticLocator`] for platform controller scenarios.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use svc_exec::ToolLocator;
use tempfile::TempDir;

/// A [`ToolLocator`] answering from a fixed table.
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    tools: HashMap<String, PathBuf>,
}

impl StaticLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as installed at `path`.
    pub fn with(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.tools.insert(name.to_string(), path.into());
        self
    }
}

impl ToolLocator for StaticLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        self.tools.get(name).cloned()
    }
}

/// A temporary directory standing in for the host's filesystem root.
///
/// # Example
///
/// ```rust,no_run
/// use svc_test_utils::TestHost;
///
/// let host = TestHost::new();
/// let rc_conf = host.write_file("etc/rc.conf", "sshd_enable=\"YES\"\n");
/// host.write_script("etc/init.d/nginx");
/// assert!(rc_conf.is_file());
/// ```
pub struct TestHost {
    temp_dir: TempDir,
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHost {
    /// Create an empty temporary root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `rel` under the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a trivial executable script at `rel`.
    pub fn write_script(&self, rel: &str) -> PathBuf {
        let path = self.write_file(rel, "#!/bin/sh\nexit 0\n");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    /// Read the file at `rel` back as a string.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }
}
