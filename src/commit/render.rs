// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Conventional Commit text rendering.

use crate::error::CommitError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Line breaks (and the whitespace hugging them) inside a header field.
    static ref LINE_BREAKS: Regex = Regex::new(r"[ \t]*[\r\n]+[ \t]*").unwrap();
}

/// Final commit text. Always ends with exactly one newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage(String);

impl RenderedMessage {
    /// Take editor output. Blank text yields `None`.
    pub fn from_edited(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(format!("{}\n", trimmed)))
        }
    }

    /// Take a message supplied on the command line, bypassing synthesis.
    pub fn literal(text: &str) -> Result<Self, CommitError> {
        Self::from_edited(text).ok_or(CommitError::EmptyMessage)
    }

    /// The full message text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first line.
    pub fn header(&self) -> &str {
        self.0.lines().next().unwrap_or("")
    }

    /// Everything after the blank line that follows the header.
    pub fn body(&self) -> Option<&str> {
        self.0
            .split_once("\n\n")
            .map(|(_, body)| body.trim_end())
            .filter(|body| !body.is_empty())
    }
}

impl AsRef<str> for RenderedMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RenderedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render `type(scope): summary` plus an optional body.
pub fn render(
    commit_type: &str,
    scope: Option<&str>,
    summary: &str,
    body: Option<&str>,
) -> RenderedMessage {
    render_parts(commit_type, scope, false, summary, body)
}

/// Render with the Conventional Commit `!` breaking-change marker when `breaking` is set.
pub(crate) fn render_parts(
    commit_type: &str,
    scope: Option<&str>,
    breaking: bool,
    summary: &str,
    body: Option<&str>,
) -> RenderedMessage {
    let mut header = single_line(commit_type);
    if let Some(scope) = scope.map(single_line).filter(|s| !s.is_empty()) {
        header.push('(');
        header.push_str(&scope);
        header.push(')');
    }
    if breaking {
        header.push('!');
    }
    header.push_str(": ");
    header.push_str(&single_line(summary));

    let header = header.trim();
    match body.map(str::trim).filter(|b| !b.is_empty()) {
        Some(body) => RenderedMessage(format!("{}\n\n{}\n", header, body)),
        None => RenderedMessage(format!("{}\n", header)),
    }
}

fn single_line(field: &str) -> String {
    LINE_BREAKS.replace_all(field.trim(), " ").into_owned()
}
