//! Service reconciliation engine for svcctl
//!
//! Brings one operating-system service to a desired running and autostart
//! state, touching it only when needed.
//!
//! # Modules
//!
//! - [`request`]: [`ServiceRequest`] and [`DesiredState`]
//! - [`platform`]: [`PlatformIdentity`], which selects a controller
//! - [`controller`]: one [`ServiceController`] per init family
//! - [`status`]: the [`StatusDetector`] heuristic cascade
//! - [`engine`]: [`ReconciliationEngine`] and the pure [`decide_action`]
//! - [`report`]: [`ServiceReport`] and [`FailureReport`]
//! - [`config`]: [`EngineConfig`], loaded from TOML

pub mod command;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod platform;
pub mod report;
pub mod request;
pub mod state;
pub mod status;
pub mod tools;

pub use command::Invocation;
pub use config::{EngineConfig, SpecialCase};
pub use controller::{Enablement, Host, ServiceController};
pub use engine::{Observation, Outcome, Plan, ReconciliationEngine, decide_action};
pub use error::{Error, Result};
pub use platform::{OsFamily, PlatformIdentity};
pub use report::{FailureReport, ReportedState, ServiceReport};
pub use request::{DesiredState, ServiceRequest};
pub use state::{ActionDecision, RunningState};
pub use status::{DetectionStrategy, Heuristic, StatusDetector};
pub use tools::{ToolRole, ToolSet};
