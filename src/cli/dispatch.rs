// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Command dispatch and execution.

use crate::analysis::DiffInput;
use crate::commit::{CommitSynthesizer, RenderedMessage, ReviewOutcome, ReviewSession};
use crate::config::{load_config, load_config_from, ScribeConfig};
use crate::error::{Result, ResultExt, ScribeError};
use crate::git::{capture_staged, Repository, Vcs};
use crate::llm::OllamaClient;

use super::args::{add_target, AddArgs, Cli, Commands, CommitArgs, InitArgs, ModelArgs};
use super::output::show_success;
use super::terminal::ConsoleTerminal;

/// File written by `scribe init`.
pub const CONFIG_FILE_NAME: &str = "scribe.toml";

/// Run the CLI with the given arguments.
pub fn run(cli: &Cli) -> Result<()> {
    match cli.effective_command() {
        Commands::Commit(args) => run_commit(&load(cli)?, args),
        Commands::Suggest(args) => run_suggest(&load(cli)?, args),
        Commands::Preview(args) => run_preview(&load(cli)?, args),
        Commands::Add(args) => run_add(args),
        Commands::Version => run_version(),
        Commands::Init(args) => run_init(args),
    }
}

/// Load configuration and apply its colour preference.
fn load(cli: &Cli) -> Result<ScribeConfig> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    console::set_colors_enabled(config.ui.color);
    console::set_colors_enabled_stderr(config.ui.color);
    Ok(config)
}

/// Build the model client when this invocation wants one.
fn model_client(config: &ScribeConfig, use_model: bool) -> Option<OllamaClient> {
    if !use_model {
        return None;
    }
    match OllamaClient::from_config(&config.llm) {
        Ok(client) => {
            tracing::debug!("Using model {} at {}", config.llm.model, client.url());
            Some(client)
        }
        Err(e) => {
            tracing::warn!("Could not create model client, using heuristics: {}", e);
            None
        }
    }
}

fn synthesize(config: &ScribeConfig, input: &DiffInput, model: &ModelArgs) -> RenderedMessage {
    let use_model = model.use_model(config.llm.enabled);
    CommitSynthesizer::new(config, model_client(config, use_model)).synthesize(input, use_model)
}

/// Run the commit command.
fn run_commit(config: &ScribeConfig, args: CommitArgs) -> Result<()> {
    tracing::debug!("Running commit command with args: {:?}", args);

    let repo = Repository::open_current()?;
    let input = capture_staged(&repo)?;

    let message = match args.message.as_deref() {
        Some(literal) => RenderedMessage::literal(literal)?,
        None => synthesize(config, &input, &args.model),
    };

    repo.commit(message.as_str())?;
    let branch = current_branch_or_head(&repo);
    show_success("commit", Some(&branch), None);
    Ok(())
}

/// Run the interactive suggest command.
fn run_suggest(config: &ScribeConfig, args: ModelArgs) -> Result<()> {
    tracing::debug!("Running suggest command with args: {:?}", args);

    let repo = Repository::open_current()?;
    let input = capture_staged(&repo)?;

    let use_model = args.use_model(config.llm.enabled);
    let synthesizer = CommitSynthesizer::new(config, model_client(config, use_model));
    let mut session = ReviewSession::start(&repo, &synthesizer, &input, use_model, &config.ui);
    let mut terminal = ConsoleTerminal::new();

    match session.run(&mut terminal)? {
        ReviewOutcome::Committed { branch, .. } => show_success("commit", Some(&branch), None),
        ReviewOutcome::Aborted => {
            eprintln!("{}", console::style("Aborted.").yellow().for_stderr());
        }
    }
    Ok(())
}

/// Run the preview command.
fn run_preview(config: &ScribeConfig, args: ModelArgs) -> Result<()> {
    tracing::debug!("Running preview command with args: {:?}", args);

    let repo = Repository::open_current()?;
    let input = capture_staged(&repo)?;
    print!("{}", synthesize(config, &input, &args));
    Ok(())
}

/// Run the add command.
fn run_add(args: AddArgs) -> Result<()> {
    tracing::debug!("Running add command with args: {:?}", args);

    let repo = Repository::open_current()?;
    if args.paths.is_empty() {
        repo.stage_all()?;
    } else {
        repo.stage_paths(&args.paths)?;
    }
    show_success("add", Some(&add_target(&args.paths)), None);
    Ok(())
}

fn current_branch_or_head<V: Vcs>(vcs: &V) -> String {
    vcs.current_branch().unwrap_or_else(|e| {
        tracing::debug!("Branch lookup failed after commit: {}", e);
        "HEAD".to_string()
    })
}

/// Run the version command.
fn run_version() -> Result<()> {
    println!("scribe {}", crate::version::version_string());

    if let Some(sha) = crate::version::GIT_SHA {
        println!("git commit: {}", sha);
    }
    if let Some(date) = crate::version::GIT_COMMIT_DATE {
        println!("commit date: {}", date);
    }

    Ok(())
}

/// Run the init command.
fn run_init(args: InitArgs) -> Result<()> {
    use crate::config::default::example_config;

    tracing::debug!("Running init command with args: {:?}", args);

    let config_path = std::path::Path::new(CONFIG_FILE_NAME);
    let existed = config_path.exists();

    if existed && !args.force {
        return Err(ScribeError::WithContext {
            context: "init".to_string(),
            message: "Configuration file already exists. Use --force to overwrite.".to_string(),
        });
    }

    std::fs::write(config_path, example_config()).context("Failed to write configuration")?;

    show_success("init", Some(CONFIG_FILE_NAME), existed.then_some("overwritten"));
    Ok(())
}
