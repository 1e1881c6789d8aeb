//! Error types for svc-cli

use svc_core::FailureReport;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from svc-core
    #[error(transparent)]
    Core(#[from] svc_core::Error),

    /// Report could not be serialized
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// The failure object printed on stdout.
    pub fn failure_report(&self) -> FailureReport {
        match self {
            CliError::Core(e) => FailureReport::from(e),
            other => FailureReport::message(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svc_exec::CommandResult;

    #[test]
    fn core_failure_keeps_command_output() {
        let error = CliError::from(svc_core::Error::CommandFailed {
            action: "stop".into(),
            service: "cron".into(),
            result: CommandResult::new(2, "", "denied"),
        });
        let report = error.failure_report();
        assert_eq!(report.rc, Some(2));
        assert_eq!(report.stderr.as_deref(), Some("denied"));
    }

    #[test]
    fn plain_failure_has_message_only() {
        let error = CliError::from(svc_core::Error::invalid_request("service name must not be empty"));
        let report = error.failure_report();
        assert_eq!(report.msg, "Invalid request: service name must not be empty");
        assert_eq!(report.rc, None);
    }
}
