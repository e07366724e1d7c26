// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Interactive review of a synthesized commit message.
//!
//! A small state machine: the message is presented, then the user commits,
//! edits, regenerates or quits. Editing and regenerating return to
//! presenting; committing and quitting end the session.

use crate::analysis::DiffInput;
use crate::config::UiConfig;
use crate::error::Result;
use crate::git::Vcs;
use crate::llm::DraftModel;

use super::preview::boxed_lines;
use super::render::RenderedMessage;
use super::synthesize::CommitSynthesizer;

/// Shown after input that matches no action.
pub const ACTION_GUIDANCE: &str =
    "Unrecognized choice. Use [c]ommit, [e]dit, [r]egenerate or [q]uit.";

/// Something the user asked for at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Commit,
    Edit,
    Regenerate,
    Quit,
}

impl ReviewAction {
    /// Parse a case-insensitive action word.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "c" | "commit" | "y" | "yes" => Some(Self::Commit),
            "e" | "edit" => Some(Self::Edit),
            "r" | "regen" | "regenerate" => Some(Self::Regenerate),
            "q" | "quit" | "n" | "no" | "cancel" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }

    fn target(self) -> ReviewState {
        match self {
            Self::Commit => ReviewState::Committing,
            Self::Edit => ReviewState::Editing,
            Self::Regenerate => ReviewState::Regenerating,
            Self::Quit => ReviewState::Quit,
        }
    }
}

/// Where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Presenting,
    Editing,
    Regenerating,
    Committing,
    Quit,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The message was committed on `branch`.
    Committed { branch: String, message: RenderedMessage },
    /// The user quit; nothing was committed.
    Aborted,
}

/// The terminal the review runs on.
pub trait ReviewTerminal {
    /// Current width in columns.
    fn width(&self) -> usize;

    /// Draw a boxed message.
    fn show_message(&mut self, lines: &[String]) -> Result<()>;

    /// Ask for the next action and return the raw answer.
    fn prompt_action(&mut self) -> Result<String>;

    /// Open an editor seeded with `seed`. `None` means the user cancelled.
    fn edit(&mut self, seed: &str) -> Result<Option<String>>;

    /// Status line.
    fn note(&mut self, text: &str) -> Result<()>;

    /// Warning line.
    fn warn(&mut self, text: &str) -> Result<()>;
}

/// One interactive review, from first draft to commit or quit.
pub struct ReviewSession<'a, V: ?Sized, M> {
    vcs: &'a V,
    synthesizer: &'a CommitSynthesizer<'a, M>,
    input: &'a DiffInput,
    use_model: bool,
    ui: &'a UiConfig,
    message: RenderedMessage,
    state: ReviewState,
    needs_redraw: bool,
    last_width: Option<usize>,
}

impl<'a, V: Vcs + ?Sized, M: DraftModel> ReviewSession<'a, V, M> {
    /// Synthesize the first message and start presenting it.
    pub fn start(
        vcs: &'a V,
        synthesizer: &'a CommitSynthesizer<'a, M>,
        input: &'a DiffInput,
        use_model: bool,
        ui: &'a UiConfig,
    ) -> Self {
        let message = synthesizer.synthesize(input, use_model);
        Self {
            vcs,
            synthesizer,
            input,
            use_model,
            ui,
            message,
            state: ReviewState::Presenting,
            needs_redraw: true,
            last_width: None,
        }
    }

    pub fn message(&self) -> &RenderedMessage {
        &self.message
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Drive the session until it ends.
    pub fn run<T: ReviewTerminal + ?Sized>(&mut self, term: &mut T) -> Result<ReviewOutcome> {
        loop {
            if let Some(outcome) = self.step(term)? {
                return Ok(outcome);
            }
        }
    }

    /// Perform one transition. Returns the outcome once a terminal state is reached.
    pub fn step<T: ReviewTerminal + ?Sized>(
        &mut self,
        term: &mut T,
    ) -> Result<Option<ReviewOutcome>> {
        match self.state {
            ReviewState::Presenting => {
                self.present(term)?;
                let answer = term.prompt_action()?;
                self.apply_answer(&answer, term)?;
            }
            ReviewState::Editing => self.edit(term)?,
            ReviewState::Regenerating => self.regenerate(),
            ReviewState::Committing => return self.commit().map(Some),
            ReviewState::Quit => return Ok(Some(ReviewOutcome::Aborted)),
        }
        Ok(None)
    }

    /// Redraw the box if the message changed or the terminal was resized.
    pub fn present<T: ReviewTerminal + ?Sized>(&mut self, term: &mut T) -> Result<()> {
        let width = term.width();
        if self.last_width != Some(width) {
            self.needs_redraw = true;
            self.last_width = Some(width);
        }
        if self.needs_redraw {
            term.show_message(&boxed_lines(self.message.as_str(), width, self.ui))?;
            self.needs_redraw = false;
        }
        Ok(())
    }

    /// Move to the state named by `answer`; unknown answers only print guidance.
    pub fn apply_answer<T: ReviewTerminal + ?Sized>(
        &mut self,
        answer: &str,
        term: &mut T,
    ) -> Result<()> {
        match ReviewAction::parse(answer) {
            Some(action) => {
                tracing::debug!("Review action: {:?}", action);
                self.state = action.target();
            }
            None => term.warn(ACTION_GUIDANCE)?,
        }
        Ok(())
    }

    fn edit<T: ReviewTerminal + ?Sized>(&mut self, term: &mut T) -> Result<()> {
        self.state = ReviewState::Presenting;
        match term.edit(self.message.as_str()) {
            Ok(Some(text)) => match RenderedMessage::from_edited(&text) {
                Some(edited) => {
                    self.message = edited;
                    self.needs_redraw = true;
                }
                None => term.note("Edited message was empty; keeping the previous one.")?,
            },
            Ok(None) => term.note("Edit cancelled; message unchanged.")?,
            Err(e) => {
                tracing::debug!("Editor failed: {}", e);
                term.warn(&format!("Editor failed ({}); message unchanged.", e))?;
            }
        }
        Ok(())
    }

    fn regenerate(&mut self) {
        self.message = self.synthesizer.synthesize(self.input, self.use_model);
        self.needs_redraw = true;
        self.state = ReviewState::Presenting;
    }

    fn commit(&mut self) -> Result<ReviewOutcome> {
        self.vcs.commit(self.message.as_str())?;
        let branch = self.vcs.current_branch().unwrap_or_else(|e| {
            tracing::debug!("Branch lookup failed after commit: {}", e);
            "HEAD".to_string()
        });
        Ok(ReviewOutcome::Committed {
            branch,
            message: self.message.clone(),
        })
    }
}
