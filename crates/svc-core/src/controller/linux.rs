//! Linux init family: SysV scripts, upstart, systemd

use svc_exec::CommandResult;

use super::{Enablement, Host, ServiceController, run_action, run_enable_command};
use crate::command::Invocation;
use crate::request::ServiceRequest;
use crate::state::ActionDecision;
use crate::status::{DetectionStrategy, LINUX_CASCADE};
use crate::tools::{ToolRole, ToolSet, is_tool};
use crate::{Error, Result};

/// Autostart tools, most preferred first.
const ENABLE_TOOLS: &[&str] = &["systemctl", "chkconfig", "update-rc.d"];

pub struct LinuxController<'a> {
    host: Host<'a>,
}

impl<'a> LinuxController<'a> {
    pub fn new(host: Host<'a>) -> Self {
        Self { host }
    }

    /// `<control> <verb>` for the service with the request's arguments.
    fn invocation(
        &self,
        tools: &ToolSet,
        request: &ServiceRequest,
        verb: &str,
    ) -> Result<Invocation> {
        let name = request.name();
        let invocation = if let Some(control) = tools.get(ToolRole::Control) {
            if is_tool(control, "systemctl") {
                Invocation::new(control).arg(verb).arg(name)
            } else {
                Invocation::new(control).arg(name).arg(verb)
            }
        } else if let Some(script) = tools.get(ToolRole::InitScript) {
            Invocation::new(script).arg(verb)
        } else {
            return Err(no_control_tool(name));
        };
        Ok(invocation.args(request.arguments().iter().cloned()))
    }

    fn restart(&self, tools: &ToolSet, request: &ServiceRequest) -> Result<CommandResult> {
        let stop = self.invocation(tools, request, "stop")?.run(self.host.runner)?;
        let start = self.invocation(tools, request, "start")?.run(self.host.runner)?;
        Ok(merge_restart(stop, start))
    }
}

impl ServiceController for LinuxController<'_> {
    fn platform(&self) -> String {
        self.host.identity.os.to_string()
    }

    fn host(&self) -> Host<'_> {
        self.host
    }

    fn discover_tools(&self, request: &ServiceRequest) -> Result<ToolSet> {
        let locator = self.host.locator;
        let name = request.name();

        let enable = ENABLE_TOOLS
            .iter()
            .find_map(|tool| locator.locate(tool))
            .ok_or_else(|| no_control_tool(name))?;
        let mut tools = ToolSet::new().with(ToolRole::Enable, enable);

        let script = self.host.config.init_dir.join(name);
        if let Some(service) = locator.locate("service") {
            tools = tools.with(ToolRole::Control, service);
        } else if script.is_file() {
            tools = tools.with(ToolRole::InitScript, script);
        } else if let Some(systemctl) = locator.locate("systemctl") {
            tools = tools.with(ToolRole::Control, systemctl);
        } else {
            return Err(no_control_tool(name));
        }

        if let Some(initctl) = locator.locate("initctl") {
            tools = tools.with(ToolRole::InitQuery, initctl);
        }

        for (role, path) in tools.iter() {
            tracing::debug!(role = %role, path = %path.display(), "Discovered tool");
        }
        Ok(tools)
    }

    fn detection(&self, tools: &ToolSet, request: &ServiceRequest) -> Result<DetectionStrategy> {
        Ok(DetectionStrategy {
            status: self.invocation(tools, request, "status")?,
            init_query: tools
                .get(ToolRole::InitQuery)
                .map(|initctl| Invocation::new(initctl).arg("status").arg(request.name())),
            cascade: LINUX_CASCADE,
        })
    }

    fn set_enabled(
        &self,
        tools: &ToolSet,
        request: &ServiceRequest,
        enable: bool,
    ) -> Result<Enablement> {
        let name = request.name();
        let tool = tools
            .get(ToolRole::Enable)
            .ok_or_else(|| no_control_tool(name))?;

        let invocation = if is_tool(tool, "systemctl") {
            Invocation::new(tool)
                .arg(if enable { "enable" } else { "disable" })
                .arg(systemd_unit(name))
        } else if is_tool(tool, "chkconfig") {
            Invocation::new(tool)
                .arg(name)
                .arg(if enable { "on" } else { "off" })
        } else if is_tool(tool, "update-rc.d") {
            Invocation::new(tool)
                .arg(name)
                .arg(if enable { "enable" } else { "disable" })
        } else {
            return Err(Error::tool_discovery(format!(
                "unsupported enable tool {}",
                tool.display()
            )));
        };

        run_enable_command(self.host, &invocation, request, enable)
    }

    fn control(
        &self,
        tools: &ToolSet,
        request: &ServiceRequest,
        action: ActionDecision,
    ) -> Result<CommandResult> {
        if action == ActionDecision::Restart {
            return self.restart(tools, request);
        }
        run_action(self.host, action, |verb| self.invocation(tools, request, verb))
    }
}

fn no_control_tool(name: &str) -> Error {
    Error::tool_discovery(format!("no service or tool found for: {}", name))
}

/// `name.service` unless the name already carries a unit suffix.
fn systemd_unit(name: &str) -> String {
    if name.contains('.') {
        name.to_string()
    } else {
        format!("{}.service", name)
    }
}

/// Combine the two halves of a synthesized restart.
///
/// A failed stop followed by a good start counts as the start alone, since
/// stopping a service that was not running commonly fails. Anything else
/// concatenates both outputs and sums the exit codes so a partial restart
/// never reads as success.
pub(crate) fn merge_restart(stop: CommandResult, start: CommandResult) -> CommandResult {
    if !stop.is_success() && start.is_success() {
        return start;
    }
    CommandResult {
        code: stop.code.saturating_add(start.code),
        stdout: stop.stdout + &start.stdout,
        stderr: stop.stderr + &start.stderr,
    }
}
