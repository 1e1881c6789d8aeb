//! Synchronous command execution

use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde::Serialize;

use crate::error::{Error, Result};

/// Exit code and captured output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    /// Exit code; `-1` when the process was killed by a signal
    pub code: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandResult {
    pub fn new(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// A successful result with no output, for steps that ran nothing.
    pub fn success() -> Self {
        Self::default()
    }

    /// Whether the command exited with status zero
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    fn from_output(output: &Output) -> Self {
        Self {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs external programs to completion.
///
/// Implementations block until the program exits. A non-zero exit code is
/// not an error at this level; only failing to start the program is.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, waiting for it to finish.
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandResult>;
}

/// Render a command the way it would be typed, for logs and test keys.
pub fn command_line(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<CommandResult> {
        tracing::debug!(command = %command_line(program, args), "Running command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let result = CommandResult::from_output(&output);
        tracing::debug!(code = result.code, "Command finished");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_joins_arguments() {
        let line = command_line(
            Path::new("/usr/sbin/service"),
            &["nginx".to_string(), "status".to_string()],
        );
        assert_eq!(line, "/usr/sbin/service nginx status");
    }

    #[test]
    fn test_command_line_without_arguments() {
        assert_eq!(command_line(Path::new("/bin/ps"), &[]), "/bin/ps");
    }

    #[test]
    fn test_synthetic_success() {
        let result = CommandResult::success();
        assert!(result.is_success());
        assert!(result.stdout.is_empty());
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn test_nonzero_is_not_success() {
        assert!(!CommandResult::new(3, "stopped", "").is_success());
    }

    #[test]
    fn test_system_runner_missing_program() {
        let err = SystemRunner::new()
            .run(Path::new("/nonexistent/svcctl-test-binary"), &[])
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/svcctl-test-binary"));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_output_and_code() {
        let result = SystemRunner::new()
            .run(
                Path::new("/bin/sh"),
                &["-c".to_string(), "echo out; echo err >&2; exit 3".to_string()],
            )
            .unwrap();

        assert_eq!(result.code, 3);
        assert_eq!(result.stdout, "out\n");
        assert_eq!(result.stderr, "err\n");
    }
}
