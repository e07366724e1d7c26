// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! One candidate commit message per call.

use crate::analysis::{classify, summarize_diff, DiffInput};
use crate::config::ScribeConfig;
use crate::llm::{build_user_prompt, DraftModel, SYSTEM_PROMPT};

use super::draft::CommitDraft;
use super::render::RenderedMessage;

/// Turns a staged change into a commit message, optionally with a model.
///
/// Model failures never escape: the heuristic draft is always a valid answer.
pub struct CommitSynthesizer<'a, M> {
    config: &'a ScribeConfig,
    model: Option<M>,
}

impl<'a, M: DraftModel> CommitSynthesizer<'a, M> {
    /// Create a synthesizer. `model` may be absent even when the config enables it.
    pub fn new(config: &'a ScribeConfig, model: Option<M>) -> Self {
        Self { config, model }
    }

    /// Produce the final message text.
    pub fn synthesize(&self, input: &DiffInput, use_model: bool) -> RenderedMessage {
        self.draft(input, use_model).render()
    }

    /// Produce the structured draft.
    pub fn draft(&self, input: &DiffInput, use_model: bool) -> CommitDraft {
        let synthesis = &self.config.synthesis;
        let classification = classify(input.diff(), input.files(), synthesis.scope_mode);
        let stats = summarize_diff(input.diff());
        let heuristic = CommitDraft::heuristic(&classification, stats, synthesis.summary_max_chars);

        tracing::debug!(
            commit_type = %classification.commit_type,
            scope = ?classification.scope,
            stats = %stats.shorthand(),
            "heuristic classification"
        );

        if !use_model {
            return heuristic;
        }

        let Some(model) = self.model.as_ref() else {
            tracing::warn!("Model requested but no client is available, using heuristics");
            return heuristic;
        };

        let prompt = match build_user_prompt(&classification, stats, input, synthesis) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!("Could not build model prompt: {}", e);
                return heuristic;
            }
        };

        match model.generate(SYSTEM_PROMPT, &prompt) {
            Ok(reply) => {
                tracing::debug!("Model reply: {:?}", reply);
                CommitDraft::from_reply(&reply, &heuristic, synthesis.summary_max_chars)
            }
            Err(e) => {
                tracing::warn!("Model draft failed, falling back to heuristics: {}", e);
                tracing::warn!("Prompt sent to model:\n{}", prompt);
                heuristic
            }
        }
    }
}
