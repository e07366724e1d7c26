// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The staged change a synthesis run works from.

/// A staged diff and the files it touches, captured once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInput {
    diff: String,
    files: Vec<String>,
}

impl DiffInput {
    /// Capture a diff and its ordered file list.
    pub fn new(diff: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            diff: diff.into(),
            files,
        }
    }

    /// The raw unified diff text.
    pub fn diff(&self) -> &str {
        &self.diff
    }

    /// Changed file paths, in the order git reported them.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Whether there is anything to commit.
    pub fn is_empty(&self) -> bool {
        self.diff.trim().is_empty()
    }
}
