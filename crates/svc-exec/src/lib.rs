//! External command execution for svcctl
//!
//! The service engine never spawns processes or searches `PATH` itself. It
//! goes through the two traits defined here:
//!
//! - [`CommandRunner`]: run a program to completion, capturing exit code and output
//! - [`ToolLocator`]: resolve a tool name to an absolute path
//!
//! [`SystemRunner`] and [`PathLocator`] are the real implementations.

pub mod error;
pub mod locator;
pub mod runner;

pub use error::{Error, Result};
pub use locator::{PathLocator, ToolLocator};
pub use runner::{CommandResult, CommandRunner, SystemRunner, command_line};
