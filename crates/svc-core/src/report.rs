//! Invocation results

use serde::Serialize;

use crate::Error;
use crate::engine::Outcome;
use crate::request::{DesiredState, ServiceRequest};

/// State reported back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportedState {
    Started,
    Stopped,
    /// Running state could not be determined
    Absent,
}

impl ReportedState {
    fn from_running(running: Option<bool>) -> Self {
        match running {
            Some(true) => ReportedState::Started,
            Some(false) => ReportedState::Stopped,
            None => ReportedState::Absent,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested: Option<DesiredState>,
    pub state: ReportedState,
    /// Running flag after the action; `None` when never determined
    pub running: Option<bool>,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    pub check_mode: bool,
}

impl ServiceReport {
    pub fn new(request: &ServiceRequest, outcome: &Outcome, check_mode: bool) -> Self {
        let decision = outcome.plan.decision;
        let running = decision
            .resulting_running()
            .or_else(|| outcome.plan.observed.as_bool());
        let enable_changed = outcome
            .enablement
            .as_ref()
            .and_then(|e| e.changed)
            .unwrap_or(false);

        Self {
            name: request.name().to_string(),
            requested: request.state(),
            state: ReportedState::from_running(running),
            running,
            changed: !decision.is_noop() || enable_changed,
            enabled: request.enabled(),
            check_mode,
        }
    }
}

/// Failure summary in the shape orchestrators expect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub failed: bool,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl FailureReport {
    /// A failure with only a message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            failed: true,
            msg: msg.into(),
            rc: None,
            stdout: None,
            stderr: None,
        }
    }
}

impl From<&Error> for FailureReport {
    fn from(err: &Error) -> Self {
        let mut report = Self::message(err.to_string());
        if let Some(result) = err.command_result() {
            report.rc = Some(result.code);
            report.stdout = Some(result.stdout.clone());
            report.stderr = Some(result.stderr.clone());
        }
        report
    }
}
