//! Shell-style word splitting
//!
//! Splits a line the way a POSIX shell would split a simple command:
//! whitespace separates words, single quotes are literal, double quotes allow
//! `\"` and `\\` escapes, a backslash outside quotes escapes the next
//! character, and an unquoted `#` starts a comment that runs to the end of
//! the line.

use crate::{Error, Result};

/// Split `line` into shell words, dropping any trailing comment.
///
/// # Errors
///
/// Returns `Error::Lex` for an unterminated quote or a trailing escape.
///
/// # Example
///
/// ```
/// use svc_fs::split_words;
///
/// let words = split_words(r#"sshd_enable="YES"  # managed"#).unwrap();
/// assert_eq!(words, vec!["sshd_enable=YES"]);
/// ```
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    // A word can be started by an empty quoted string, so track it apart
    // from `current.is_empty()`.
    let mut in_word = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '#' => break,
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(Error::lex(line, "no closing quotation")),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.peek() {
                            Some(&next) if next == '"' || next == '\\' => {
                                current.push(next);
                                chars.next();
                            }
                            Some(_) => current.push('\\'),
                            None => return Err(Error::lex(line, "no closing quotation")),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(Error::lex(line, "no closing quotation")),
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(ch) => current.push(ch),
                    None => return Err(Error::lex(line, "no escaped character")),
                }
            }
            ch => {
                in_word = true;
                current.push(ch);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}
