//! Fallback for platforms without a controller

use svc_exec::CommandResult;

use super::{Enablement, Host, ServiceController};
use crate::request::ServiceRequest;
use crate::state::ActionDecision;
use crate::status::DetectionStrategy;
use crate::tools::ToolSet;
use crate::{Error, Result};

/// Every operation fails with [`Error::NotImplemented`].
pub struct GenericController<'a> {
    host: Host<'a>,
}

impl<'a> GenericController<'a> {
    pub fn new(host: Host<'a>) -> Self {
        Self { host }
    }

    fn not_implemented(&self, operation: &'static str) -> Error {
        Error::NotImplemented {
            operation,
            platform: self.platform(),
        }
    }
}

impl ServiceController for GenericController<'_> {
    fn platform(&self) -> String {
        self.host.identity.os.to_string()
    }

    fn host(&self) -> Host<'_> {
        self.host
    }

    fn discover_tools(&self, _request: &ServiceRequest) -> Result<ToolSet> {
        Err(self.not_implemented("get_service_tools"))
    }

    fn detection(&self, _tools: &ToolSet, _request: &ServiceRequest) -> Result<DetectionStrategy> {
        Err(self.not_implemented("get_service_status"))
    }

    fn set_enabled(
        &self,
        _tools: &ToolSet,
        _request: &ServiceRequest,
        _enable: bool,
    ) -> Result<Enablement> {
        Err(self.not_implemented("service_enable"))
    }

    fn control(
        &self,
        _tools: &ToolSet,
        _request: &ServiceRequest,
        _action: ActionDecision,
    ) -> Result<CommandResult> {
        Err(self.not_implemented("service_control"))
    }
}
