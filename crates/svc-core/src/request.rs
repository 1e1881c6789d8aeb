//! Service request model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Target condition requested for a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    Started,
    Stopped,
    Restarted,
    Reloaded,
}

impl FromStr for DesiredState {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "started" | "running" => Ok(DesiredState::Started),
            "stopped" => Ok(DesiredState::Stopped),
            "restarted" => Ok(DesiredState::Restarted),
            "reloaded" => Ok(DesiredState::Reloaded),
            _ => Err(Error::invalid_request(format!(
                "unknown state '{}' (expected started, stopped, restarted or reloaded)",
                s
            ))),
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesiredState::Started => write!(f, "started"),
            DesiredState::Stopped => write!(f, "stopped"),
            DesiredState::Restarted => write!(f, "restarted"),
            DesiredState::Reloaded => write!(f, "reloaded"),
        }
    }
}

/// One service reconciliation request.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    name: String,
    state: Option<DesiredState>,
    pattern: Option<String>,
    enabled: Option<bool>,
    arguments: Vec<String>,
}

impl ServiceRequest {
    /// Create a request for `name` with nothing else asked for.
    ///
    /// # Errors
    ///
    /// Rejects an empty name, and names containing `/` since the name is
    /// joined onto init script directories.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_request("service name must not be empty"));
        }
        if name.contains('/') {
            return Err(Error::invalid_request(format!(
                "service name '{}' must not contain '/'",
                name
            )));
        }
        Ok(Self {
            name,
            state: None,
            pattern: None,
            enabled: None,
            arguments: Vec::new(),
        })
    }

    pub fn with_state(mut self, state: DesiredState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_arguments(mut self, arguments: Vec<String>) -> Self {
        self.arguments = arguments;
        self
    }

    /// Split `line` with shell word rules and use the words as arguments.
    pub fn with_argument_line(self, line: &str) -> Result<Self> {
        let arguments = svc_fs::split_words(line)
            .map_err(|e| Error::invalid_request(format!("arguments: {}", e)))?;
        Ok(self.with_arguments(arguments))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> Option<DesiredState> {
        self.state
    }

    /// Process-table pattern, if one was given. An empty pattern counts as none.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }

    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }
}
