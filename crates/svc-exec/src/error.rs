//! Error types for command execution

use std::path::PathBuf;

/// Errors that can occur while running external commands
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The program could not be started at all
    #[error("Failed to execute {program}: {source}")]
    Spawn {
        /// Program that was invoked
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for command execution
pub type Result<T> = std::result::Result<T, Error>;
