//! Filesystem layer for svcctl
//!
//! Provides crash-safe file replacement and the editor for rc.conf style
//! boot configuration files:
//!
//! - [`io`]: write-to-temp-then-rename replacement in the target's directory
//! - [`lexer`]: shell-style word splitting with comment stripping
//! - [`rcconf`]: `key="value"` upsert on top of the two above

pub mod error;
pub mod io;
pub mod lexer;
pub mod rcconf;

pub use error::{Error, Result};
pub use lexer::split_words;
pub use rcconf::{BootConfigEntry, Plan};
