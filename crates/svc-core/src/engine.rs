//! Reconciliation engine
//!
//! A run is a fixed pipeline. Each stage consumes the previous stage's value:
//!
//! ```text
//! discover_tools -> ToolSet -> observe -> Observation -> plan -> Plan -> execute -> Outcome
//! ```
//!
//! Nothing is recomputed after it has been acted on.

use svc_exec::{CommandResult, CommandRunner, ToolLocator};

use crate::config::EngineConfig;
use crate::controller::{self, Enablement, Host, ServiceController};
use crate::platform::PlatformIdentity;
use crate::report::ServiceReport;
use crate::request::{DesiredState, ServiceRequest};
use crate::state::{ActionDecision, RunningState};
use crate::tools::ToolSet;
use crate::{Error, Result};

/// Discovered tools plus the detected running state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub tools: ToolSet,
    pub running: RunningState,
}

/// The action chosen for an observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub tools: ToolSet,
    pub observed: RunningState,
    pub decision: ActionDecision,
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub plan: Plan,
    /// Output of the control action; synthetic success when nothing ran
    pub result: CommandResult,
    pub enablement: Option<Enablement>,
}

/// Decide what to do given desired and observed state.
///
/// Returns `None` when a desired state was given but the observed state is
/// unknown, since no decision can be made safely.
pub fn decide_action(
    desired: Option<DesiredState>,
    observed: RunningState,
) -> Option<ActionDecision> {
    let Some(desired) = desired else {
        return Some(ActionDecision::NoOp);
    };
    if !observed.is_known() {
        return None;
    }

    let running = observed == RunningState::Running;
    let decision = match desired {
        DesiredState::Started if !running => ActionDecision::Start,
        DesiredState::Stopped if running => ActionDecision::Stop,
        // Reloading a stopped service does nothing, it does not start it
        DesiredState::Reloaded if running => ActionDecision::Reload,
        DesiredState::Restarted => ActionDecision::Restart,
        _ => ActionDecision::NoOp,
    };
    Some(decision)
}

/// Drives one service toward its desired state.
///
/// # Example
///
/// ```rust,no_run
/// use svc_core::{EngineConfig, PlatformIdentity, ReconciliationEngine, ServiceRequest, DesiredState};
/// use svc_exec::{PathLocator, SystemRunner};
///
/// let config = EngineConfig::default();
/// let runner = SystemRunner::new();
/// let locator = PathLocator::new(&config.search_paths);
/// let engine = ReconciliationEngine::new(&runner, &locator, config, PlatformIdentity::detect());
///
/// let request = ServiceRequest::new("nginx")?.with_state(DesiredState::Started);
/// let report = engine.run(&request)?;
/// println!("changed: {}", report.changed);
/// # Ok::<(), svc_core::Error>(())
/// ```
pub struct ReconciliationEngine<'a> {
    runner: &'a dyn CommandRunner,
    locator: &'a dyn ToolLocator,
    config: EngineConfig,
    identity: PlatformIdentity,
}

impl<'a> ReconciliationEngine<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        locator: &'a dyn ToolLocator,
        config: EngineConfig,
        identity: PlatformIdentity,
    ) -> Self {
        Self {
            runner,
            locator,
            config,
            identity,
        }
    }

    fn host(&self) -> Host<'_> {
        Host {
            runner: self.runner,
            locator: self.locator,
            config: &self.config,
            identity: &self.identity,
        }
    }

    /// Reconcile the service named by `request`.
    pub fn run(&self, request: &ServiceRequest) -> Result<ServiceReport> {
        let controller = controller::select(self.host());
        tracing::debug!(
            platform = %self.identity,
            controller = %controller.platform(),
            service = request.name(),
            "Reconciling service"
        );

        let tools = controller.discover_tools(request)?;
        let observation = self.observe(controller.as_ref(), request, tools)?;
        let plan = self.plan(request, observation)?;
        let outcome = self.execute(controller.as_ref(), request, plan)?;

        Ok(ServiceReport::new(request, &outcome, self.config.check_mode))
    }

    pub fn observe(
        &self,
        controller: &dyn ServiceController,
        request: &ServiceRequest,
        tools: ToolSet,
    ) -> Result<Observation> {
        let running = controller.detect_status(&tools, request)?;
        tracing::debug!(service = request.name(), state = %running, "Observed service");
        Ok(Observation { tools, running })
    }

    /// # Errors
    ///
    /// [`Error::UndeterminedState`] when a state was requested but the
    /// observation is unknown.
    pub fn plan(&self, request: &ServiceRequest, observation: Observation) -> Result<Plan> {
        let decision = decide_action(request.state(), observation.running).ok_or_else(|| {
            Error::UndeterminedState {
                name: request.name().to_string(),
            }
        })?;
        tracing::debug!(service = request.name(), decision = %decision, "Decided action");
        Ok(Plan {
            tools: observation.tools,
            observed: observation.running,
            decision,
        })
    }

    /// Apply the plan's action, then the requested autostart setting.
    pub fn execute(
        &self,
        controller: &dyn ServiceController,
        request: &ServiceRequest,
        plan: Plan,
    ) -> Result<Outcome> {
        let result = self.apply(controller, request, &plan)?;
        let enablement = match request.enabled() {
            Some(enable) => Some(controller.set_enabled(&plan.tools, request, enable)?),
            None => None,
        };
        Ok(Outcome {
            plan,
            result,
            enablement,
        })
    }

    /// Run the plan's control action.
    ///
    /// # Errors
    ///
    /// [`Error::CommandFailed`] when the action exits non-zero.
    pub fn apply(
        &self,
        controller: &dyn ServiceController,
        request: &ServiceRequest,
        plan: &Plan,
    ) -> Result<CommandResult> {
        let decision = plan.decision;
        if decision.is_noop() {
            return Ok(CommandResult::success());
        }
        if self.config.check_mode {
            tracing::info!(service = request.name(), "[check] Would {} service", decision);
            return Ok(CommandResult::success());
        }

        tracing::info!(service = request.name(), action = %decision, "Applying service action");
        let result = controller.control(&plan.tools, request, decision)?;
        if !result.is_success() {
            return Err(Error::CommandFailed {
                action: decision.to_string(),
                service: request.name().to_string(),
                result,
            });
        }
        Ok(result)
    }
}
