//! [`ScriptedRunner`]: a [`CommandRunner`] that replays canned results.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use svc_exec::{CommandResult, CommandRunner, command_line};

/// Exit code returned for commands nobody scripted.
pub const UNSCRIPTED_CODE: i32 = 127;

/// Replays results registered per command line and records every call.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use svc_exec::{CommandResult, CommandRunner};
/// use svc_test_utils::ScriptedRunner;
///
/// let runner = ScriptedRunner::new()
///     .on("/usr/sbin/service nginx status", CommandResult::new(0, "running", ""));
///
/// let result = runner
///     .run(Path::new("/usr/sbin/service"), &["nginx".to_string(), "status".to_string()])
///     .unwrap();
/// assert_eq!(result.code, 0);
/// assert_eq!(runner.calls(), vec!["/usr/sbin/service nginx status"]);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, CommandResult>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `line` with `result`. A later registration for the same line wins.
    pub fn on(mut self, line: &str, result: CommandResult) -> Self {
        self.responses.insert(line.to_string(), result);
        self
    }

    /// Answer `line` with exit code 0 and `stdout`.
    pub fn ok(self, line: &str, stdout: &str) -> Self {
        self.on(line, CommandResult::new(0, stdout, ""))
    }

    /// Answer `line` with exit code `code` and `stdout`.
    pub fn exit(self, line: &str, code: i32, stdout: &str) -> Self {
        self.on(line, CommandResult::new(code, stdout, ""))
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Whether any recorded command line starts with `prefix`.
    pub fn ran(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &Path, args: &[String]) -> svc_exec::Result<CommandResult> {
        let line = command_line(program, args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line.clone());
        }
        Ok(self.responses.get(&line).cloned().unwrap_or_else(|| {
            CommandResult::new(
                UNSCRIPTED_CODE,
                "",
                format!("no scripted response for: {}", line),
            )
        }))
    }
}
