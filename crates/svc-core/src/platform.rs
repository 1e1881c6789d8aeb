//! Platform identity

use std::fmt;
use std::path::Path;

/// Operating-system family, as far as service management is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    FreeBsd,
    OpenBsd,
    /// Any other target, by its `std::env::consts::OS` name
    Other(String),
}

impl OsFamily {
    /// The family this binary was compiled for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => OsFamily::Linux,
            "freebsd" => OsFamily::FreeBsd,
            "openbsd" => OsFamily::OpenBsd,
            other => OsFamily::Other(other.to_string()),
        }
    }

    fn is_solaris_family(&self) -> bool {
        matches!(self, OsFamily::Other(os) if os == "solaris" || os == "illumos")
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Linux => write!(f, "Linux"),
            OsFamily::FreeBsd => write!(f, "FreeBSD"),
            OsFamily::OpenBsd => write!(f, "OpenBSD"),
            OsFamily::Other(os) => write!(f, "{}", os),
        }
    }
}

/// The host's OS family and, on Linux, its distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformIdentity {
    pub os: OsFamily,
    pub distribution: Option<String>,
}

impl PlatformIdentity {
    pub fn new(os: OsFamily, distribution: Option<String>) -> Self {
        Self { os, distribution }
    }

    /// Identify the running host.
    pub fn detect() -> Self {
        let os = OsFamily::current();
        let distribution = match os {
            OsFamily::Linux => read_distribution(Path::new("/etc/os-release")),
            _ => None,
        };
        tracing::debug!(os = %os, distribution = ?distribution, "Detected platform");
        Self { os, distribution }
    }

    /// Flags giving a full process listing from `ps` on this host.
    pub fn ps_flags(&self) -> &'static str {
        if self.os.is_solaris_family() {
            "-ef"
        } else {
            "auxww"
        }
    }
}

impl fmt::Display for PlatformIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.distribution {
            Some(distribution) => write!(f, "{} ({})", self.os, distribution),
            None => write!(f, "{}", self.os),
        }
    }
}

fn read_distribution(path: &Path) -> Option<String> {
    match svc_fs::io::read_text(path) {
        Ok(content) => parse_os_release_id(&content),
        Err(e) => {
            tracing::debug!("No distribution information: {}", e);
            None
        }
    }
}

/// Extract the lower-cased `ID` field from os-release content.
pub fn parse_os_release_id(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let words = svc_fs::split_words(line).ok()?;
        let value = words.first()?.strip_prefix("ID=")?;
        (!value.is_empty()).then(|| value.to_lowercase())
    })
}
