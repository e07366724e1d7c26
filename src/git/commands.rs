// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git command-line wrappers.
//!
//! Commits go through the `git` binary so hooks and signing config apply and
//! failures carry git's own output.

use crate::error::{GitError, Result, ScribeError};
use std::path::Path;
use std::process::Command;

/// Options applied to every invocation.
const GIT_PREFIX: &[&str] = &["-c", "core.quotepath=false", "-c", "i18n.logOutputEncoding=utf-8"];

/// Run `git <args>` in `workdir` and return trimmed stdout.
///
/// A non-zero exit becomes `GitError::CommandFailed` whose message is git's
/// stdout and stderr, unmodified apart from trimming.
pub fn run_git(workdir: &Path, args: &[&str]) -> Result<String> {
    let command = args.first().copied().unwrap_or("").to_string();
    tracing::debug!("Running git {:?} in {:?}", args, workdir);

    let output = Command::new("git")
        .args(GIT_PREFIX)
        .args(args)
        .current_dir(workdir)
        .output()
        .map_err(|e| {
            ScribeError::Git(GitError::CommandFailed {
                command: command.clone(),
                message: format!("Failed to run git: {}", e),
            })
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = [stdout.as_str(), stderr.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n");
        let message = if message.is_empty() {
            format!("git failed: git {}", args.join(" "))
        } else {
            message
        };
        return Err(ScribeError::Git(GitError::CommandFailed { command, message }));
    }

    Ok(stdout)
}

/// Create a commit with the given message.
pub fn create_commit(workdir: &Path, message: &str) -> Result<()> {
    run_git(workdir, &["commit", "-m", message]).map(|_| ())
}
