// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// scribe - Conventional Commit messages from staged changes
///
/// Classifies the staged diff, optionally asks a local language model for a
/// better summary, and commits directly or after an interactive review.
#[derive(Parser, Debug)]
#[command(name = "scribe")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Conventional Commit messages from staged changes", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run (defaults to suggest if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Commit immediately with a generated message (no confirmation)
    Commit(CommitArgs),

    /// Generate a message and review it before committing (default command)
    Suggest(ModelArgs),

    /// Print the generated message without committing
    Preview(ModelArgs),

    /// Stage files for the next commit
    Add(AddArgs),

    /// Print version information
    Version,

    /// Write an example scribe.toml
    Init(InitArgs),
}

/// Per-invocation override of `llm.enabled`.
#[derive(Args, Debug, Default, Clone)]
pub struct ModelArgs {
    /// Use the language model for this invocation
    #[arg(long, conflicts_with = "no_llm")]
    pub llm: bool,

    /// Use heuristics only for this invocation
    #[arg(long)]
    pub no_llm: bool,
}

impl ModelArgs {
    /// Whether to use the model, given the configured default.
    pub fn use_model(&self, configured: bool) -> bool {
        if self.llm {
            true
        } else if self.no_llm {
            false
        } else {
            configured
        }
    }
}

/// Arguments for the commit command.
#[derive(Args, Debug, Default, Clone)]
pub struct CommitArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Use this message as-is instead of generating one
    #[arg(short = 'm', long)]
    pub message: Option<String>,
}

/// Arguments for the add command.
#[derive(Args, Debug, Default, Clone)]
pub struct AddArgs {
    /// Files or directories to stage (defaults to all changes)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the init command.
#[derive(Args, Debug, Default, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

impl Cli {
    /// Get the effective command, defaulting to Suggest if none specified.
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Suggest(ModelArgs::default()))
    }

    /// The action and target named in `[ERR]` lines for this invocation.
    pub fn describe(&self) -> (&'static str, Option<String>) {
        match self.effective_command() {
            Commands::Commit(_) | Commands::Suggest(_) => ("commit", None),
            Commands::Preview(_) => ("preview", None),
            Commands::Add(args) => ("add", Some(add_target(&args.paths))),
            Commands::Version => ("version", None),
            Commands::Init(_) => ("init", Some(super::dispatch::CONFIG_FILE_NAME.to_string())),
        }
    }
}

/// `all`, or the paths joined with commas.
pub fn add_target(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        "all".to_string()
    } else {
        paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
