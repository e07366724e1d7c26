// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit type and scope inference.

use crate::config::{CommitType, ScopeMode};
use std::path::Path;

/// Directory prefix whose files are all tests.
const TEST_DIR: &str = "tests/";

/// Directory prefix holding documentation (matched case-insensitively).
const DOCS_DIR: &str = "docs/";

/// Words in a diff that point at a bug fix.
const FIX_KEYWORDS: &[&str] = &["fix", "bug", "error", "exception"];

/// Heuristic judgement about a staged change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The inferred commit type.
    pub commit_type: CommitType,
    /// The inferred scope, if any.
    pub scope: Option<String>,
}

/// Classify a diff into a commit type and an optional scope.
///
/// Rules are checked in order and the first match wins:
/// all files under `tests/`, any docs file or top-level readme,
/// a fix keyword anywhere in the diff, and finally `feat`.
pub fn classify<S: AsRef<str>>(diff: &str, files: &[S], scope_mode: ScopeMode) -> Classification {
    Classification {
        commit_type: infer_type(diff, files),
        scope: match scope_mode {
            ScopeMode::FirstDir => infer_scope(files),
            ScopeMode::None => None,
        },
    }
}

/// Infer the commit type from the diff text and the staged file list.
pub fn infer_type<S: AsRef<str>>(diff: &str, files: &[S]) -> CommitType {
    if !files.is_empty() && files.iter().all(|f| f.as_ref().starts_with(TEST_DIR)) {
        return CommitType::Test;
    }

    if files.iter().any(|f| is_docs_path(f.as_ref())) {
        return CommitType::Docs;
    }

    let lowered = diff.to_lowercase();
    if FIX_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return CommitType::Fix;
    }

    CommitType::Feat
}

/// The first path segment of the first changed file.
pub fn infer_scope<S: AsRef<str>>(files: &[S]) -> Option<String> {
    let first = files.first()?;
    Path::new(first.as_ref())
        .components()
        .next()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
}

fn is_docs_path(path: &str) -> bool {
    let lowered = path.to_lowercase();
    if lowered.starts_with(DOCS_DIR) {
        return true;
    }
    // Top-level readme only: README, README.md, readme.rst, ...
    !lowered.contains('/') && (lowered == "readme" || lowered.starts_with("readme."))
}
