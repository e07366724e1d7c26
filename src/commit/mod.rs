// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit module: drafting, rendering, synthesis and interactive review.

mod draft;
mod preview;
mod render;
mod review;
mod synthesize;

pub use draft::{truncate_summary, CommitDraft};
pub use preview::{box_width, boxed_lines};
pub use render::{render, RenderedMessage};
pub use review::{
    ReviewAction, ReviewOutcome, ReviewSession, ReviewState, ReviewTerminal, ACTION_GUIDANCE,
};
pub use synthesize::CommitSynthesizer;
