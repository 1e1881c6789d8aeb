//! Discovered tooling

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Logical role a discovered tool plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolRole {
    /// Unified control wrapper (`service`, or `systemctl`)
    Control,
    /// Autostart management binary
    Enable,
    /// Per-service init or rc script
    InitScript,
    /// Init daemon query binary (`initctl`)
    InitQuery,
}

impl fmt::Display for ToolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolRole::Control => write!(f, "control"),
            ToolRole::Enable => write!(f, "enable"),
            ToolRole::InitScript => write!(f, "init script"),
            ToolRole::InitQuery => write!(f, "init query"),
        }
    }
}

/// Paths of the tools found by discovery, keyed by role.
///
/// Only built through [`ToolSet::with`] during discovery; read-only after.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSet {
    tools: BTreeMap<ToolRole, PathBuf>,
}

impl ToolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: ToolRole, path: impl Into<PathBuf>) -> Self {
        self.tools.insert(role, path.into());
        self
    }

    pub fn get(&self, role: ToolRole) -> Option<&Path> {
        self.tools.get(&role).map(PathBuf::as_path)
    }

    pub fn has(&self, role: ToolRole) -> bool {
        self.tools.contains_key(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ToolRole, &Path)> {
        self.tools.iter().map(|(role, path)| (*role, path.as_path()))
    }
}

/// Whether `path` names the tool `name`, judged by file name.
pub fn is_tool(path: &Path, name: &str) -> bool {
    path.file_name().is_some_and(|f| f == name)
}
