// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The real terminal behind the interactive review.

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Editor, Input};

use crate::commit::ReviewTerminal;
use crate::error::Result;

const ACTION_PROMPT: &str = "Action? [c]ommit / [e]dit / [r]egen / [q]uit";

/// Review terminal on stderr, with dialoguer prompts and `$EDITOR`.
pub struct ConsoleTerminal {
    term: Term,
    theme: ColorfulTheme,
}

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewTerminal for ConsoleTerminal {
    fn width(&self) -> usize {
        let (_rows, cols) = self.term.size();
        cols as usize
    }

    fn show_message(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            self.term
                .write_line(&style(line).cyan().bright().for_stderr().to_string())?;
        }
        Ok(())
    }

    fn prompt_action(&mut self) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(ACTION_PROMPT)
            .allow_empty(true)
            .interact_text_on(&self.term)?;
        Ok(answer)
    }

    fn edit(&mut self, seed: &str) -> Result<Option<String>> {
        self.note("Opening editor...")?;
        Ok(Editor::new().edit(seed)?)
    }

    fn note(&mut self, text: &str) -> Result<()> {
        self.term
            .write_line(&style(text).blue().for_stderr().to_string())?;
        Ok(())
    }

    fn warn(&mut self, text: &str) -> Result<()> {
        self.term
            .write_line(&style(text).yellow().for_stderr().to_string())?;
        Ok(())
    }
}
