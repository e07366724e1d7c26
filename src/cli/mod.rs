// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI module for scribe.
//!
//! This module handles command-line argument parsing, command dispatch and
//! terminal output.

pub mod args;
mod dispatch;
pub mod output;
mod terminal;

pub use args::{Cli, Commands};
pub use dispatch::{run, CONFIG_FILE_NAME};
pub use terminal::ConsoleTerminal;
