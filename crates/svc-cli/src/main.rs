//! svcctl CLI
//!
//! Reconciles one service and prints the outcome as a JSON object on stdout.

mod cli;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use svc_core::{EngineConfig, PlatformIdentity, ReconciliationEngine, ServiceReport, ServiceRequest};
use svc_exec::{PathLocator, SystemRunner};

use cli::Cli;
use error::{CliError, Result};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    match run(&cli).and_then(|report| Ok(serde_json::to_string(&report)?)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            fail(&e);
            std::process::exit(1);
        }
    }
}

fn fail(error: &CliError) {
    match serde_json::to_string(&error.failure_report()) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize failure report: {}", e),
    }
    eprintln!("{}: {}", "error".red().bold(), error);
}

fn run(cli: &Cli) -> Result<ServiceReport> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if cli.check {
        config.check_mode = true;
    }

    let request = build_request(cli)?;
    tracing::debug!(?request, check_mode = config.check_mode, "Parsed request");

    let runner = SystemRunner::new();
    let locator = PathLocator::new(&config.search_paths);
    let engine = ReconciliationEngine::new(&runner, &locator, config, PlatformIdentity::detect());

    Ok(engine.run(&request)?)
}

fn build_request(cli: &Cli) -> Result<ServiceRequest> {
    let mut request = ServiceRequest::new(cli.name.as_str())?;
    if let Some(state) = cli.state {
        request = request.with_state(state);
    }
    if let Some(pattern) = &cli.pattern {
        request = request.with_pattern(pattern.as_str());
    }
    if let Some(enabled) = cli.enabled {
        request = request.with_enabled(enabled);
    }
    if let Some(arguments) = &cli.arguments {
        request = request.with_argument_line(arguments)?;
    }
    Ok(request)
}
