// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for scribe.
//!
//! Failures are grouped by the boundary they come from. Model failures are
//! recovered inside the synthesizer; git failures always end the command.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for scribe operations.
#[derive(Error, Debug)]
pub enum ScribeError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Git errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    // Commit errors
    #[error("Commit error: {0}")]
    Commit(#[from] CommitError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // UI/Interactive errors
    #[error("UI error: {0}")]
    Ui(String),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl From<dialoguer::Error> for ScribeError {
    fn from(err: dialoguer::Error) -> Self {
        ScribeError::Ui(err.to_string())
    }
}

impl ScribeError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// The text shown to the user under the `[ERR]` line.
    ///
    /// Git command failures are surfaced verbatim, without our own prefix.
    /// A missing staged change reads as a plain instruction.
    pub fn user_message(&self) -> String {
        match self {
            ScribeError::Git(GitError::CommandFailed { message, .. }) => message.clone(),
            ScribeError::Git(err @ GitError::NoStagedChanges) => err.to_string(),
            other => other.to_string(),
        }
    }
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Git-related errors.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Failed to open repository: {message}")]
    OpenFailed { message: String },

    #[error("no staged changes. Run `scribe add ...` and try again.")]
    NoStagedChanges,

    #[error("Failed to get diff: {message}")]
    DiffFailed { message: String },

    #[error("Failed to stage files: {message}")]
    StageFailed { message: String },

    #[error("git {command} failed: {message}")]
    CommandFailed { command: String, message: String },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::OpenFailed {
            message: err.message().to_string(),
        }
    }
}

/// Errors talking to the local model service.
///
/// Every variant except `AttemptsExhausted` describes a single failed attempt.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("model service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response envelope: {message}")]
    Envelope { message: String },

    #[error("model reply is not a JSON object: {message}")]
    MalformedDraft { message: String },

    #[error("failed to build prompt: {message}")]
    Prompt { message: String },

    #[error("all {attempts} attempts failed, last error: {last}")]
    AttemptsExhausted {
        attempts: u32,
        last: Box<ModelError>,
    },
}

/// Commit-related errors.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Empty commit message")]
    EmptyMessage,
}

/// Result type alias for scribe operations.
pub type Result<T> = std::result::Result<T, ScribeError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ScribeError::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
