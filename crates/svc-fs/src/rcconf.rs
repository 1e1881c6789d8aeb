//! rc.conf style boot configuration editing
//!
//! Files in this format hold one `key="value"` shell assignment per line.
//! [`upsert`] makes sure a key carries a given value, touching at most one
//! line and replacing the file atomically.

use std::path::PathBuf;

use crate::lexer::split_words;
use crate::{Result, io};

/// A key that should hold a value in a boot configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootConfigEntry {
    /// File to edit
    pub path: PathBuf,
    /// Variable name, e.g. `sshd_enable`
    pub key: String,
    /// Desired value, e.g. `YES`
    pub value: String,
}

impl BootConfigEntry {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// The line written for this entry, newline included.
    pub fn line(&self) -> String {
        format!("{}=\"{}\"\n", self.key, self.value)
    }
}

/// Outcome of planning an edit on file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Whether `content` differs from the input
    pub changed: bool,
    /// The content to write
    pub content: String,
}

/// Compute the edited content without touching the filesystem.
///
/// The first assignment of `key` with exactly `value` ends the scan with no
/// change. An assignment with another value is replaced in place. If the key
/// never appears, the assignment is appended.
pub fn plan(content: &str, key: &str, value: &str) -> Plan {
    let entry = format!("{}=\"{}\"\n", key, value);
    let mut edited = String::with_capacity(content.len() + entry.len());
    let mut replaced = false;

    for line in content.split_inclusive('\n') {
        if let Some((found_key, found_value)) = assignment(line) {
            if found_key == key {
                if found_value == value {
                    return Plan {
                        changed: false,
                        content: content.to_string(),
                    };
                }
                edited.push_str(&entry);
                replaced = true;
                continue;
            }
        }
        edited.push_str(line);
    }

    if !replaced {
        if !edited.is_empty() && !edited.ends_with('\n') {
            edited.push('\n');
        }
        edited.push_str(&entry);
    }

    Plan {
        changed: true,
        content: edited,
    }
}

/// Ensure `entry` is set in its file, returning whether the file changed.
///
/// # Errors
///
/// Fails if the file cannot be read, or if writing the replacement fails.
/// In the latter case the original file is left as it was.
pub fn upsert(entry: &BootConfigEntry) -> Result<bool> {
    let plan = plan_file(entry)?;
    if !plan.changed {
        tracing::debug!(path = %entry.path.display(), key = %entry.key, "Boot config already up to date");
        return Ok(false);
    }

    io::write_atomic(&entry.path, plan.content.as_bytes())?;
    tracing::info!(
        path = %entry.path.display(),
        key = %entry.key,
        value = %entry.value,
        "Updated boot config"
    );
    Ok(true)
}

/// Report whether [`upsert`] would change the file, without writing it.
pub fn would_change(entry: &BootConfigEntry) -> Result<bool> {
    Ok(plan_file(entry)?.changed)
}

fn plan_file(entry: &BootConfigEntry) -> Result<Plan> {
    let content = io::read_text(&entry.path)?;
    Ok(plan(&content, &entry.key, &entry.value))
}

/// Parse a line as `key=value`, judged on its first shell word.
///
/// Lines that do not lex (unbalanced quotes) are never assignments.
fn assignment(line: &str) -> Option<(String, String)> {
    let words = split_words(line).ok()?;
    let first = words.into_iter().next()?;
    let (key, value) = first.split_once('=')?;
    Some((key.to_string(), value.to_string()))
}
