//! FreeBSD rc(8)

use svc_exec::CommandResult;
use svc_fs::BootConfigEntry;
use svc_fs::rcconf;

use super::{Enablement, Host, ServiceController, run_action};
use crate::command::Invocation;
use crate::request::ServiceRequest;
use crate::state::ActionDecision;
use crate::status::{BSD_CASCADE, DetectionStrategy};
use crate::tools::{ToolRole, ToolSet};
use crate::{Error, Result};

pub struct FreeBsdController<'a> {
    host: Host<'a>,
}

impl<'a> FreeBsdController<'a> {
    pub fn new(host: Host<'a>) -> Self {
        Self { host }
    }

    fn invocation(
        &self,
        tools: &ToolSet,
        request: &ServiceRequest,
        verb: &str,
    ) -> Result<Invocation> {
        if let Some(service) = tools.get(ToolRole::Control) {
            Ok(Invocation::new(service).arg(request.name()).arg(verb))
        } else if let Some(script) = tools.get(ToolRole::InitScript) {
            Ok(Invocation::new(script).arg(verb))
        } else {
            Err(not_found(request.name()))
        }
    }

    fn boot_config(&self) -> Result<&std::path::Path> {
        let candidates = &self.host.config.rc_conf_files;
        candidates
            .iter()
            .find(|path| path.is_file())
            .map(|path| path.as_path())
            .ok_or_else(|| Error::NoBootConfig {
                candidates: candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl ServiceController for FreeBsdController<'_> {
    fn platform(&self) -> String {
        self.host.identity.os.to_string()
    }

    fn host(&self) -> Host<'_> {
        self.host
    }

    fn discover_tools(&self, request: &ServiceRequest) -> Result<ToolSet> {
        let name = request.name();
        if let Some(service) = self.host.locator.locate("service") {
            tracing::debug!(path = %service.display(), "Discovered service binary");
            return Ok(ToolSet::new().with(ToolRole::Control, service));
        }

        let script = self
            .host
            .config
            .rc_d_dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| not_found(name))?;
        tracing::debug!(path = %script.display(), "Discovered rc script");
        Ok(ToolSet::new().with(ToolRole::InitScript, script))
    }

    fn detection(&self, tools: &ToolSet, request: &ServiceRequest) -> Result<DetectionStrategy> {
        Ok(DetectionStrategy {
            status: self.invocation(tools, request, "onestatus")?,
            init_query: None,
            cascade: BSD_CASCADE,
        })
    }

    fn set_enabled(
        &self,
        _tools: &ToolSet,
        request: &ServiceRequest,
        enable: bool,
    ) -> Result<Enablement> {
        let path = self.boot_config()?;
        let entry = BootConfigEntry::new(
            path,
            format!("{}_enable", request.name()),
            if enable { "YES" } else { "NO" },
        );

        let edit = if self.host.config.check_mode {
            rcconf::would_change(&entry)
        } else {
            rcconf::upsert(&entry)
        };
        let changed = edit.map_err(|source| Error::ConfigWrite {
            path: entry.path.clone(),
            source,
        })?;

        if changed && self.host.config.check_mode {
            tracing::info!(
                path = %entry.path.display(),
                "[check] Would set {}",
                entry.line().trim_end()
            );
        }
        Ok(Enablement::new(CommandResult::success(), Some(changed)))
    }

    fn control(
        &self,
        tools: &ToolSet,
        request: &ServiceRequest,
        action: ActionDecision,
    ) -> Result<CommandResult> {
        run_action(self.host, action, |verb| {
            Ok(self
                .invocation(tools, request, one_shot(verb))?
                .args(request.arguments().iter().cloned()))
        })
    }
}

/// The `one` prefix acts regardless of the rc.conf enable knob.
fn one_shot(verb: &str) -> &str {
    match verb {
        "start" => "onestart",
        "stop" => "onestop",
        "reload" => "onereload",
        other => other,
    }
}

fn not_found(name: &str) -> Error {
    Error::tool_discovery(format!(
        "unable to find service binary or rc.d script for: {}",
        name
    ))
}
