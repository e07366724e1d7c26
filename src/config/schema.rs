// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Defines all configuration structures that can be loaded from scribe.toml.

use serde::{Deserialize, Serialize};

/// The main configuration structure for scribe.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScribeConfig {
    /// Local model configuration.
    pub llm: LlmConfig,

    /// Message synthesis configuration.
    pub synthesis: SynthesisConfig,

    /// UI/UX configuration.
    pub ui: UiConfig,
}

impl ScribeConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }
}

/// Local language-model service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    /// Whether the model is used unless overridden on the command line.
    pub enabled: bool,

    /// Provider name. Only "ollama" speaks the supported wire protocol.
    pub provider: String,

    /// Model identifier sent with every request.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Token limit for the reply (`num_predict`).
    pub max_tokens: u32,

    /// Base URL of the inference service.
    pub host: String,

    /// Per-attempt timeout in seconds.
    pub timeout_secs: u64,

    /// Total attempts per generation, including the first.
    pub max_attempts: u32,

    /// Linear backoff step; attempt `n` waits `step * (n + 1)`.
    pub backoff_step_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: "ollama".to_string(),
            model: "phi3.5:3.8b".to_string(),
            temperature: 0.1,
            max_tokens: 256,
            host: "http://localhost:11434".to_string(),
            timeout_secs: 180,
            max_attempts: 3,
            backoff_step_secs: 1,
        }
    }
}

/// How the heuristic scope is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMode {
    /// First path segment of the first changed file.
    #[default]
    FirstDir,
    /// Never infer a scope.
    None,
}

/// Message synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Scope inference mode.
    pub scope_mode: ScopeMode,

    /// Maximum number of file paths included in the model prompt.
    pub max_files: usize,

    /// Maximum number of diff characters included in the model prompt.
    pub max_diff_chars: usize,

    /// Summary length limit, in characters.
    pub summary_max_chars: usize,

    /// File extensions considered text when listing files for the model.
    pub text_extensions: Vec<String>,

    /// Glob patterns for build artifacts and caches left out of the prompt.
    pub ignored_paths: Vec<String>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            scope_mode: ScopeMode::FirstDir,
            max_files: 30,
            max_diff_chars: 4000,
            summary_max_chars: 72,
            text_extensions: [
                "rs", "py", "ts", "tsx", "js", "jsx", "go", "java", "c", "h", "cpp", "hpp", "sh",
                "sql", "json", "toml", "md", "yml", "yaml", "ini", "txt", "css", "html",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ignored_paths: [
                "**/__pycache__/**",
                "**/*.egg-info/**",
                "**/node_modules/**",
                "target/**",
                "dist/**",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// UI/UX configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Whether to use colors.
    pub color: bool,

    /// Narrowest the message box is ever drawn.
    pub box_min_width: usize,

    /// Widest the message box is ever drawn.
    pub box_max_width: usize,

    /// Spaces between the border and the text.
    pub box_padding: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            box_min_width: 10,
            box_max_width: 110,
            box_padding: 1,
        }
    }
}

/// Conventional commit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Chore,
    Build,
    Ci,
}

impl CommitType {
    /// Get the string representation of the commit type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Perf => "perf",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Build => "build",
            CommitType::Ci => "ci",
        }
    }
}

impl std::str::FromStr for CommitType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "feat" | "feature" => Ok(CommitType::Feat),
            "fix" | "bugfix" => Ok(CommitType::Fix),
            "docs" | "doc" => Ok(CommitType::Docs),
            "style" => Ok(CommitType::Style),
            "refactor" => Ok(CommitType::Refactor),
            "perf" | "performance" => Ok(CommitType::Perf),
            "test" | "tests" => Ok(CommitType::Test),
            "chore" => Ok(CommitType::Chore),
            "build" => Ok(CommitType::Build),
            "ci" => Ok(CommitType::Ci),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
