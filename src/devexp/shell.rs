//! Shell-like word splitting and quoting
//!
//! [`tokenize`] splits a pasted command line into words the way a POSIX
//! shell would for the subset curl commands use; [`shell_escape`] goes
//! the other way when generating commands.

use crate::errors::{CarmeliaError, Result};

/// Split a command line into words
///
/// Backslash-newline (and backslash-CRLF) continuations become a single
/// space first. Outside quotes and inside double quotes a backslash
/// escapes the next character; single quotes take everything literally.
/// Runs of unquoted space, tab, CR or LF separate words.
pub fn tokenize(input: &str) -> Result<Vec<String>> {
    let input = input.replace("\\\n", " ").replace("\\\r\n", " ");

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
            continue;
        }

        match c {
            '\\' if !in_single_quote => {
                escape_next = true;
            }
            '\'' if !in_double_quote => {
                in_single_quote = !in_single_quote;
            }
            '"' if !in_single_quote => {
                in_double_quote = !in_double_quote;
            }
            ' ' | '\t' | '\n' | '\r' if !in_single_quote && !in_double_quote => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => {
                current.push(c);
            }
        }
    }

    if in_single_quote || in_double_quote {
        return Err(CarmeliaError::UnterminatedQuote);
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Shell-escape a string for safe inclusion in a command
pub fn shell_escape(s: &str) -> String {
    let needs_escaping = s.chars().any(|c| {
        matches!(c, ' ' | '\'' | '"' | '\\' | '$' | '`' | '!' | '*' | '?' |
                    '[' | ']' | '{' | '}' | '(' | ')' | '<' | '>' | '|' |
                    '&' | ';' | '#' | '~' | '\n' | '\r' | '\t')
    });

    if !needs_escaping && !s.is_empty() {
        return s.to_string();
    }

    // Single quotes, with embedded single quotes closed, double-quoted and reopened
    format!("'{}'", s.replace('\'', "'\"'\"'"))
}
