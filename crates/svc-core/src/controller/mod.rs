//! Platform service controllers
//!
//! Each supported init family gets one [`ServiceController`] implementation.
//! Exactly one is active per run, chosen by [`select`] from the
//! [`PlatformIdentity`].

mod freebsd;
mod generic;
mod linux;
mod openbsd;

pub use freebsd::FreeBsdController;
pub use generic::GenericController;
pub use linux::LinuxController;
pub use openbsd::OpenBsdController;

use svc_exec::{CommandResult, CommandRunner, ToolLocator};

use crate::Result;
use crate::command::Invocation;
use crate::config::EngineConfig;
use crate::platform::{OsFamily, PlatformIdentity};
use crate::request::ServiceRequest;
use crate::state::{ActionDecision, RunningState};
use crate::status::{DetectionStrategy, StatusDetector};
use crate::tools::ToolSet;

/// Everything a controller needs from the outside world.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub runner: &'a dyn CommandRunner,
    pub locator: &'a dyn ToolLocator,
    pub config: &'a EngineConfig,
    pub identity: &'a PlatformIdentity,
}

/// Result of an autostart change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enablement {
    /// Output of the enable command, or a synthetic success
    pub result: CommandResult,
    /// Whether the boot configuration changed; `None` when the tool cannot say
    pub changed: Option<bool>,
}

impl Enablement {
    pub fn new(result: CommandResult, changed: Option<bool>) -> Self {
        Self { result, changed }
    }

    /// Nothing was run and nothing changed.
    pub fn unchanged() -> Self {
        Self::new(CommandResult::success(), Some(false))
    }
}

/// Service management for one platform family.
///
/// The engine calls [`discover_tools`](ServiceController::discover_tools)
/// once and passes the resulting [`ToolSet`] to every later call.
pub trait ServiceController {
    /// Name used in logs and "not implemented" errors.
    fn platform(&self) -> String;

    fn host(&self) -> Host<'_>;

    /// Find the tools this platform controls services with.
    fn discover_tools(&self, request: &ServiceRequest) -> Result<ToolSet>;

    /// The status command and heuristic cascade for this platform.
    fn detection(&self, tools: &ToolSet, request: &ServiceRequest) -> Result<DetectionStrategy>;

    /// Determine whether the service is running.
    fn detect_status(&self, tools: &ToolSet, request: &ServiceRequest) -> Result<RunningState> {
        let strategy = self.detection(tools, request)?;
        StatusDetector::new(self.host()).detect(request, &strategy)
    }

    /// Turn autostart on or off.
    fn set_enabled(
        &self,
        tools: &ToolSet,
        request: &ServiceRequest,
        enable: bool,
    ) -> Result<Enablement>;

    /// Run `action` against the service and return its raw result.
    ///
    /// A non-zero exit code is returned, not raised; the engine decides.
    fn control(
        &self,
        tools: &ToolSet,
        request: &ServiceRequest,
        action: ActionDecision,
    ) -> Result<CommandResult>;
}

/// Pick the controller for `host.identity`.
pub fn select<'a>(host: Host<'a>) -> Box<dyn ServiceController + 'a> {
    match host.identity.os {
        OsFamily::Linux => Box::new(LinuxController::new(host)),
        OsFamily::FreeBsd => Box::new(FreeBsdController::new(host)),
        OsFamily::OpenBsd => Box::new(OpenBsdController::new(host)),
        OsFamily::Other(_) => Box::new(GenericController::new(host)),
    }
}

/// Run an enable command unless in check mode.
///
/// # Errors
///
/// A non-zero exit is a [`CommandFailed`](crate::Error::CommandFailed) error.
pub(crate) fn run_enable_command(
    host: Host<'_>,
    invocation: &Invocation,
    request: &ServiceRequest,
    enable: bool,
) -> Result<Enablement> {
    let action = if enable { "enable" } else { "disable" };

    if host.config.check_mode {
        tracing::info!(command = %invocation, "[check] Would {} service", action);
        return Ok(Enablement::new(CommandResult::success(), None));
    }

    tracing::info!(service = request.name(), "Running {} command", action);
    let result = invocation.run(host.runner)?;
    if !result.is_success() {
        return Err(crate::Error::CommandFailed {
            action: action.to_string(),
            service: request.name().to_string(),
            result,
        });
    }
    Ok(Enablement::new(result, None))
}

/// Run the action's invocation, or succeed without running anything for a no-op.
pub(crate) fn run_action(
    host: Host<'_>,
    action: ActionDecision,
    build: impl FnOnce(&'static str) -> Result<Invocation>,
) -> Result<CommandResult> {
    match action.verb() {
        Some(verb) => build(verb)?.run(host.runner),
        None => Ok(CommandResult::success()),
    }
}
