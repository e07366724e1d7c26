// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! scribe - Conventional Commit messages from staged changes.
//!
//! # Features
//!
//! - **Heuristic classification**: commit type and scope from the staged diff
//! - **Local model drafts**: optional Ollama call with bounded retries and a
//!   heuristic fallback that never fails
//! - **Interactive review**: commit, edit, regenerate or quit
//!
//! # Example
//!
//! ```no_run
//! use scribe::commit::CommitSynthesizer;
//! use scribe::config::ScribeConfig;
//! use scribe::git::{capture_staged, Repository};
//! use scribe::llm::OllamaClient;
//!
//! let config = ScribeConfig::load().unwrap();
//! let repo = Repository::open_current().unwrap();
//! let input = capture_staged(&repo).unwrap();
//!
//! let model = OllamaClient::from_config(&config.llm).ok();
//! let message = CommitSynthesizer::new(&config, model).synthesize(&input, true);
//! print!("{}", message);
//! ```

// Module declarations
pub mod analysis;
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;

// Re-exports for convenience
pub use config::ScribeConfig;
pub use error::{Result, ScribeError};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of scribe.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        let short_sha = GIT_SHA.map(|sha| sha.chars().take(7).collect::<String>());
        match (short_sha, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => format!("{} ({} {})", VERSION, sha, date),
            (Some(sha), None) => format!("{} ({})", VERSION, sha),
            _ => VERSION.to_string(),
        }
    }

}
