//! OpenBSD rc.d(8)

use svc_exec::CommandResult;

use super::{Enablement, Host, ServiceController, run_action};
use crate::command::Invocation;
use crate::request::ServiceRequest;
use crate::state::ActionDecision;
use crate::status::{BSD_CASCADE, DetectionStrategy};
use crate::tools::{ToolRole, ToolSet};
use crate::{Error, Result};

pub struct OpenBsdController<'a> {
    host: Host<'a>,
}

impl<'a> OpenBsdController<'a> {
    pub fn new(host: Host<'a>) -> Self {
        Self { host }
    }

    fn script(&self, tools: &ToolSet, request: &ServiceRequest) -> Result<Invocation> {
        tools
            .get(ToolRole::InitScript)
            .map(Invocation::new)
            .ok_or_else(|| not_found(request.name()))
    }
}

impl ServiceController for OpenBsdController<'_> {
    fn platform(&self) -> String {
        self.host.identity.os.to_string()
    }

    fn host(&self) -> Host<'_> {
        self.host
    }

    fn discover_tools(&self, request: &ServiceRequest) -> Result<ToolSet> {
        let script = self
            .host
            .config
            .rc_d_dirs
            .iter()
            .map(|dir| dir.join(request.name()))
            .find(|path| path.is_file())
            .ok_or_else(|| not_found(request.name()))?;
        tracing::debug!(path = %script.display(), "Discovered rc script");
        Ok(ToolSet::new().with(ToolRole::InitScript, script))
    }

    fn detection(&self, tools: &ToolSet, request: &ServiceRequest) -> Result<DetectionStrategy> {
        Ok(DetectionStrategy {
            status: self.script(tools, request)?.arg("check"),
            init_query: None,
            cascade: BSD_CASCADE,
        })
    }

    /// `<name>_flags` in rc.conf.local is not a boolean, so autostart is
    /// left alone.
    fn set_enabled(
        &self,
        _tools: &ToolSet,
        request: &ServiceRequest,
        enable: bool,
    ) -> Result<Enablement> {
        tracing::debug!(
            service = request.name(),
            enable,
            "Autostart is not managed on OpenBSD"
        );
        Ok(Enablement::unchanged())
    }

    fn control(
        &self,
        tools: &ToolSet,
        request: &ServiceRequest,
        action: ActionDecision,
    ) -> Result<CommandResult> {
        run_action(self.host, action, |verb| {
            Ok(self
                .script(tools, request)?
                .arg(verb)
                .args(request.arguments().iter().cloned()))
        })
    }
}

fn not_found(name: &str) -> Error {
    Error::tool_discovery(format!("unable to find rc.d script for: {}", name))
}
