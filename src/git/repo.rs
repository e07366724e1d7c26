// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GitError, Result, ScribeError};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};

use super::commands;
use super::vcs::Vcs;

/// Wrapper around git2::Repository with additional functionality.
pub struct Repository {
    inner: Git2Repo,
    workdir: PathBuf,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            ScribeError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                ScribeError::Git(GitError::NotARepository)
            } else {
                ScribeError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| {
                ScribeError::Git(GitError::OpenFailed {
                    message: "Repository has no working directory (bare repository)".to_string(),
                })
            })?
            .to_path_buf();

        Ok(Self {
            inner: repo,
            workdir,
        })
    }

    /// Get the working directory path.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Get the current branch name, or `HEAD` when detached.
    pub fn branch_name(&self) -> Result<String> {
        match self.inner.head() {
            Ok(head) if head.is_branch() => head.shorthand().map(str::to_string).ok_or_else(|| {
                ScribeError::Git(GitError::CommandFailed {
                    command: "rev-parse".to_string(),
                    message: "Invalid branch name encoding".to_string(),
                })
            }),
            Ok(_) => Ok("HEAD".to_string()),
            // Unborn branch: HEAD points at a ref that has no commit yet.
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                let head_ref = self.inner.find_reference("HEAD").map_err(GitError::from)?;
                Ok(head_ref
                    .symbolic_target()
                    .and_then(|t| t.strip_prefix("refs/heads/"))
                    .unwrap_or("HEAD")
                    .to_string())
            }
            Err(e) => Err(ScribeError::Git(GitError::OpenFailed {
                message: e.message().to_string(),
            })),
        }
    }

    /// The diff between HEAD (or the empty tree) and the index.
    fn staged(&self) -> Result<git2::Diff<'_>> {
        let head = self.inner.head().ok();
        let head_tree = head.as_ref().and_then(|h| h.peel_to_tree().ok());

        self.inner
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .map_err(|e| {
                ScribeError::Git(GitError::DiffFailed {
                    message: e.message().to_string(),
                })
            })
    }

    /// Unified patch text for everything staged.
    pub fn staged_patch(&self) -> Result<String> {
        let diff = self.staged()?;
        let mut patch = String::new();

        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            let content = String::from_utf8_lossy(line.content());
            match line.origin() {
                origin @ ('+' | '-' | ' ') => {
                    patch.push(origin);
                    patch.push_str(&content);
                }
                _ => patch.push_str(&content),
            }
            true
        })
        .map_err(|e| {
            ScribeError::Git(GitError::DiffFailed {
                message: e.message().to_string(),
            })
        })?;

        Ok(patch)
    }

    /// Paths of staged files, in diff order.
    pub fn staged_files(&self) -> Result<Vec<String>> {
        let diff = self.staged()?;
        Ok(diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect())
    }

    fn index(&self) -> Result<git2::Index> {
        self.inner.index().map_err(|e| {
            ScribeError::Git(GitError::StageFailed {
                message: e.message().to_string(),
            })
        })
    }

    /// Stage every change in the working tree, deletions included.
    pub fn stage_everything(&self) -> Result<()> {
        let mut index = self.index()?;
        let stage_err = |e: git2::Error| {
            ScribeError::Git(GitError::StageFailed {
                message: e.message().to_string(),
            })
        };

        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .map_err(stage_err)?;
        index.update_all(["*"].iter(), None).map_err(stage_err)?;
        index.write().map_err(stage_err)?;
        Ok(())
    }

    /// Stage files or directories named relative to `base`.
    ///
    /// Deleted files are staged as removals. A path that matches nothing in
    /// the working tree or the index is an error.
    pub fn stage_files_from(&self, base: &Path, paths: &[PathBuf]) -> Result<()> {
        let mut index = self.index()?;
        let stage_err = |e: git2::Error| {
            ScribeError::Git(GitError::StageFailed {
                message: e.message().to_string(),
            })
        };

        let mut pathspecs = Vec::with_capacity(paths.len());
        for path in paths {
            let spec = self.pathspec_for(base, path)?;
            if !self.matches_anything(&index, &spec) {
                return Err(ScribeError::Git(GitError::StageFailed {
                    message: format!("pathspec '{}' did not match any files", path.display()),
                }));
            }
            pathspecs.push(spec);
        }

        index
            .add_all(pathspecs.iter(), git2::IndexAddOption::DEFAULT, None)
            .map_err(stage_err)?;
        index.update_all(pathspecs.iter(), None).map_err(stage_err)?;
        index.write().map_err(stage_err)?;
        Ok(())
    }

    /// Stage paths given relative to the current directory.
    pub fn stage_files(&self, paths: &[PathBuf]) -> Result<()> {
        let cwd = std::env::current_dir().map_err(|e| {
            ScribeError::Git(GitError::StageFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        self.stage_files_from(&cwd, paths)
    }

    /// Repository-relative pathspec (forward slashes) for `path` as seen from `base`.
    fn pathspec_for(&self, base: &Path, path: &Path) -> Result<String> {
        let base = base.canonicalize().unwrap_or_else(|_| base.to_path_buf());
        let joined = normalize(&base.join(path));
        // Resolve the parent only, so a symlink is staged as itself.
        let absolute = match (joined.parent(), joined.file_name()) {
            (Some(parent), Some(name)) => parent
                .canonicalize()
                .map(|p| p.join(name))
                .unwrap_or_else(|_| joined.clone()),
            _ => joined.clone(),
        };
        let canonical_workdir = self
            .workdir
            .canonicalize()
            .unwrap_or_else(|_| self.workdir.clone());

        let relative = absolute
            .strip_prefix(&canonical_workdir)
            .or_else(|_| absolute.strip_prefix(&self.workdir))
            .map_err(|_| {
                ScribeError::Git(GitError::StageFailed {
                    message: format!("{}: outside repository", path.display()),
                })
            })?;

        let spec = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Ok(if spec.is_empty() { "*".to_string() } else { spec })
    }

    fn matches_anything(&self, index: &git2::Index, spec: &str) -> bool {
        if spec == "*" || self.workdir.join(spec).exists() {
            return true;
        }
        let prefix = format!("{}/", spec);
        index.iter().any(|entry| {
            let entry_path = String::from_utf8_lossy(&entry.path);
            entry_path == spec || entry_path.starts_with(&prefix)
        })
    }
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl Vcs for Repository {
    fn staged_diff(&self) -> Result<String> {
        self.staged_patch()
    }

    fn changed_files(&self) -> Result<Vec<String>> {
        self.staged_files()
    }

    fn commit(&self, message: &str) -> Result<()> {
        commands::create_commit(&self.workdir, message)
    }

    fn current_branch(&self) -> Result<String> {
        self.branch_name()
    }

    fn stage_all(&self) -> Result<()> {
        self.stage_everything()
    }

    fn stage_paths(&self, paths: &[PathBuf]) -> Result<()> {
        self.stage_files(paths)
    }
}
