//! Observed running state and the action derived from it

use std::fmt;

use serde::Serialize;

/// Tri-state answer to "is the service running?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunningState {
    #[default]
    Unknown,
    Running,
    NotRunning,
}

impl RunningState {
    pub fn from_running(running: bool) -> Self {
        if running {
            RunningState::Running
        } else {
            RunningState::NotRunning
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RunningState::Unknown)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RunningState::Unknown => None,
            RunningState::Running => Some(true),
            RunningState::NotRunning => Some(false),
        }
    }
}

impl fmt::Display for RunningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunningState::Unknown => write!(f, "unknown"),
            RunningState::Running => write!(f, "running"),
            RunningState::NotRunning => write!(f, "not running"),
        }
    }
}

/// What the engine will do to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionDecision {
    NoOp,
    Start,
    Stop,
    Restart,
    Reload,
}

impl ActionDecision {
    /// Action name passed to control tools; `None` for [`ActionDecision::NoOp`].
    pub fn verb(&self) -> Option<&'static str> {
        match self {
            ActionDecision::NoOp => None,
            ActionDecision::Start => Some("start"),
            ActionDecision::Stop => Some("stop"),
            ActionDecision::Restart => Some("restart"),
            ActionDecision::Reload => Some("reload"),
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, ActionDecision::NoOp)
    }

    /// Running flag once the action has succeeded; `None` leaves it unchanged.
    pub fn resulting_running(&self) -> Option<bool> {
        match self {
            ActionDecision::NoOp => None,
            ActionDecision::Stop => Some(false),
            ActionDecision::Start | ActionDecision::Restart | ActionDecision::Reload => Some(true),
        }
    }
}

impl fmt::Display for ActionDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb().unwrap_or("no-op"))
    }
}
