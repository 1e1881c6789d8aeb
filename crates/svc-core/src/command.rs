//! Command invocations built by controllers

use std::fmt;
use std::path::PathBuf;

use svc_exec::{CommandResult, CommandRunner, command_line};

use crate::Result;

/// A program plus its arguments, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run through `runner`, waiting for completion.
    pub fn run(&self, runner: &dyn CommandRunner) -> Result<CommandResult> {
        let result = runner.run(&self.program, &self.args)?;
        tracing::debug!(command = %self, code = result.code, "Command returned");
        Ok(result)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", command_line(&self.program, &self.args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svc_test_utils::ScriptedRunner;

    #[test]
    fn builds_and_runs() {
        let invocation = Invocation::new("/usr/sbin/service")
            .arg("nginx")
            .args(["status", "--full"]);
        assert_eq!(invocation.to_string(), "/usr/sbin/service nginx status --full");

        let runner = ScriptedRunner::new().ok("/usr/sbin/service nginx status --full", "ok");
        let result = invocation.run(&runner).unwrap();
        assert_eq!(result.stdout, "ok");
    }
}
