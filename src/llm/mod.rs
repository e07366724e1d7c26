// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Local language-model integration.
//!
//! A bounded prompt goes out over HTTP to an Ollama-compatible service and a
//! loosely-typed JSON draft comes back. Retries live here; fallback does not.

mod client;
pub mod prompt;
mod retry;

pub use client::{parse_reply, strip_code_fence, DraftModel, ModelReply, OllamaClient};
pub use prompt::{build_user_prompt, filter_files, truncate_diff, SYSTEM_PROMPT};
pub use retry::RetryPolicy;
