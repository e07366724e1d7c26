// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Heuristic analysis of staged changes.
//!
//! Everything here is a pure function of the diff text and file list.

mod classify;
mod input;
mod stats;

pub use classify::{classify, infer_scope, infer_type, Classification};
pub use input::DiffInput;
pub use stats::{summarize_diff, DiffStats};
