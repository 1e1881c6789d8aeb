//! Engine configuration
//!
//! Everything the engine would otherwise hard-code about the host layout
//! lives in [`EngineConfig`]. Every field has a default, so an empty TOML
//! file is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A status heuristic for services whose status output is unusual.
///
/// Applies when the request names `service` and the raw status output
/// contains `contains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialCase {
    /// Service name the rule is keyed on
    pub service: String,
    /// Substring searched for in the status command's stdout
    pub contains: String,
    /// Verdict when the substring is present
    pub running: bool,
}

impl SpecialCase {
    pub fn new(service: impl Into<String>, contains: impl Into<String>, running: bool) -> Self {
        Self {
            service: service.into(),
            contains: contains.into(),
            running,
        }
    }
}

/// `iptables status` prints the rule table instead of a state word.
fn builtin_special_cases() -> Vec<SpecialCase> {
    vec![SpecialCase::new("iptables", "ACCEPT", true)]
}

/// Configuration for a [`ReconciliationEngine`](crate::ReconciliationEngine) run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Compute and report the decision without executing anything
    pub check_mode: bool,
    /// Directories searched for tools after `PATH`
    pub search_paths: Vec<PathBuf>,
    /// Directory holding Linux init scripts
    pub init_dir: PathBuf,
    /// Directories holding BSD rc scripts, in search order
    pub rc_d_dirs: Vec<PathBuf>,
    /// Candidate rc.conf files; the first existing one is edited
    pub rc_conf_files: Vec<PathBuf>,
    /// Flag literal used to pass a pattern on the command line. Process
    /// listing lines containing it are our own invocation and are skipped.
    pub pattern_flag: String,
    /// Extra special-case status rules, consulted after the built-in ones
    pub special_cases: Vec<SpecialCase>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            check_mode: false,
            search_paths: ["/sbin", "/usr/sbin", "/bin", "/usr/bin"]
                .iter()
                .map(PathBuf::from)
                .collect(),
            init_dir: PathBuf::from("/etc/init.d"),
            rc_d_dirs: vec![
                PathBuf::from("/etc/rc.d"),
                PathBuf::from("/usr/local/etc/rc.d"),
            ],
            rc_conf_files: vec![
                PathBuf::from("/etc/rc.conf"),
                PathBuf::from("/usr/local/etc/rc.conf"),
            ],
            pattern_flag: "--pattern".to_string(),
            special_cases: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = svc_fs::io::read_text(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            Error::Config { message, .. } => Error::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            path: PathBuf::new(),
            message: e.message().to_string(),
        })
    }

    /// Built-in special cases followed by the configured ones.
    pub fn special_case_table(&self) -> Vec<SpecialCase> {
        let mut table = builtin_special_cases();
        table.extend(self.special_cases.iter().cloned());
        table
    }
}
