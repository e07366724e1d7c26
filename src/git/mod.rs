// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Git integration module.
//!
//! This module provides the version-control operations scribe needs.

pub mod commands;
mod repo;
mod vcs;

pub use commands::{create_commit, run_git};
pub use repo::Repository;
pub use vcs::{capture_staged, Vcs};
