// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for scribe.
//!
//! This module handles loading, parsing, and validating configuration from
//! files and environment variables.

pub mod default;
mod loader;
mod schema;

pub use default::default_config;
pub use loader::{
    apply_env_overrides, find_config_file, load_config, load_config_from, parse_config, validate,
    ENV_LLM_ENABLED, ENV_LLM_HOST, ENV_LLM_MODEL,
};
pub use schema::*;
