//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;
use clap::builder::BoolishValueParser;
use svc_core::DesiredState;

/// svcctl - Bring a system service to a desired state
#[derive(Parser, Debug)]
#[command(name = "svcctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the service
    pub name: String,

    /// Desired state: started (or running), stopped, restarted, reloaded
    #[arg(short, long)]
    pub state: Option<DesiredState>,

    /// Treat the service as running when a process listing line contains this.
    /// Long form only: listing lines holding `--pattern` are skipped as our own.
    #[arg(long)]
    pub pattern: Option<String>,

    /// Whether the service should start on boot (true/false, yes/no)
    #[arg(short, long, value_parser = BoolishValueParser::new())]
    pub enabled: Option<bool>,

    /// Extra arguments passed to the control command, split like a shell would
    #[arg(short, long, allow_hyphen_values = true)]
    pub arguments: Option<String>,

    /// Report what would change without changing anything
    #[arg(long)]
    pub check: bool,

    /// Engine configuration file (TOML)
    #[arg(short, long, env = "SVCCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
