//! Shared test utilities for the svcctl workspace.
//!
//! Engine tests must never touch the host's real init system. This crate
//! provides stand-ins for the two process-facing traits plus a scratch host
//! layout. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`runner`]: [`ScriptedRunner`], canned command results keyed by command line
//! - [`host`]: [`TestHost`], a temporary filesystem root with rc.conf / init script helpers

pub mod host;
pub mod runner;

pub use host::{StaticLocator, TestHost};
pub use runner::ScriptedRunner;
