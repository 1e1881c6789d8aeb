//! Error types for svc-fs

use std::path::PathBuf;

/// Result type for svc-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in svc-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to replace {path} with {temp}: {source}")]
    Replace {
        path: PathBuf,
        temp: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot split '{line}': {message}")]
    Lex { line: String, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn lex(line: &str, message: &str) -> Self {
        Self::Lex {
            line: line.trim_end().to_string(),
            message: message.to_string(),
        }
    }
}
