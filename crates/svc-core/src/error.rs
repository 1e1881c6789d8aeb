//! Error types for svc-core

use std::path::PathBuf;

use svc_exec::CommandResult;

/// Result type for svc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reconciling a service
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Required control or enable tooling is not installed
    #[error("{message}")]
    ToolDiscovery { message: String },

    /// No status heuristic produced an answer while a state change was requested
    #[error(
        "failed determining the current state of service '{name}': cannot determine change because current state is unknown"
    )]
    UndeterminedState { name: String },

    /// A control or enable command exited non-zero
    #[error("Failed to {action} service '{service}' (exit code {}): {}", .result.code, failure_detail(.result))]
    CommandFailed {
        action: String,
        service: String,
        result: CommandResult,
    },

    /// Writing the boot configuration failed; the original file is unchanged
    #[error("Failed to update boot configuration {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: svc_fs::Error,
    },

    /// None of the candidate boot configuration files exist
    #[error("No boot configuration file found (looked for {candidates})")]
    NoBootConfig { candidates: String },

    /// Operation invoked on a platform without a controller
    #[error("{operation} not implemented on target platform {platform}")]
    NotImplemented {
        operation: &'static str,
        platform: String,
    },

    /// Malformed service request
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Engine configuration could not be loaded
    #[error("Failed to load config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A command could not be started
    #[error(transparent)]
    Exec(#[from] svc_exec::Error),
}

impl Error {
    pub fn tool_discovery(message: impl Into<String>) -> Self {
        Self::ToolDiscovery {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// The captured output of the command that failed, if a command failed.
    pub fn command_result(&self) -> Option<&CommandResult> {
        match self {
            Self::CommandFailed { result, .. } => Some(result),
            _ => None,
        }
    }
}

/// Prefer stderr, fall back to stdout, for a one-line failure summary.
fn failure_detail(result: &CommandResult) -> String {
    let stderr = result.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = result.stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    "no output".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_prefers_stderr() {
        let err = Error::CommandFailed {
            action: "start".into(),
            service: "nginx".into(),
            result: CommandResult::new(1, "Starting nginx", "bind() failed\n"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to start service 'nginx' (exit code 1): bind() failed"
        );
        assert_eq!(err.command_result().map(|r| r.code), Some(1));
    }

    #[test]
    fn command_failed_without_output() {
        let err = Error::CommandFailed {
            action: "stop".into(),
            service: "redis".into(),
            result: CommandResult::new(4, "", ""),
        };
        assert!(err.to_string().ends_with("(exit code 4): no output"));
    }

    #[test]
    fn undetermined_state_names_service() {
        let err = Error::UndeterminedState {
            name: "memcached".into(),
        };
        let display = err.to_string();
        assert!(display.contains("memcached"));
        assert!(display.contains("current state is unknown"));
        assert!(err.command_result().is_none());
    }
}
