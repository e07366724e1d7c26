// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The version-control surface the rest of scribe depends on.

use crate::analysis::DiffInput;
use crate::error::{GitError, Result, ScribeError};
use std::path::PathBuf;

/// Synchronous version-control operations.
///
/// Every method either returns its result or a git failure; callers never
/// recover from these.
pub trait Vcs {
    /// Unified diff of the staged changes.
    fn staged_diff(&self) -> Result<String>;

    /// Staged file paths, relative to the repository root.
    fn changed_files(&self) -> Result<Vec<String>>;

    /// Record a commit with `message`.
    fn commit(&self, message: &str) -> Result<()>;

    /// Name of the checked-out branch.
    fn current_branch(&self) -> Result<String>;

    /// Stage every change in the working tree.
    fn stage_all(&self) -> Result<()>;

    /// Stage the given paths.
    fn stage_paths(&self, paths: &[PathBuf]) -> Result<()>;
}

/// Capture the staged change, failing when nothing is staged.
pub fn capture_staged<V: Vcs + ?Sized>(vcs: &V) -> Result<DiffInput> {
    let diff = vcs.staged_diff()?;
    if diff.trim().is_empty() {
        return Err(ScribeError::Git(GitError::NoStagedChanges));
    }
    let files = vcs.changed_files()?;
    tracing::debug!(files = files.len(), bytes = diff.len(), "captured staged diff");
    Ok(DiffInput::new(diff, files))
}
