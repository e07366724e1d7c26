// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration loading, environment overrides and validation.

use crate::error::{ConfigError, Result, ScribeError};
use std::path::{Path, PathBuf};

use super::schema::ScribeConfig;

/// Configuration file names to search for, in order of priority.
const CONFIG_FILES: &[&str] = &["scribe.toml", ".scribe.toml", ".config/scribe.toml"];

/// Environment variable overriding `llm.host`.
pub const ENV_LLM_HOST: &str = "SCRIBE_LLM_HOST";
/// Environment variable overriding `llm.model`.
pub const ENV_LLM_MODEL: &str = "SCRIBE_LLM_MODEL";
/// Environment variable overriding `llm.enabled`.
pub const ENV_LLM_ENABLED: &str = "SCRIBE_LLM_ENABLED";

/// Find the configuration file in the current directory or parent directories.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    find_config_file_from(&current_dir)
}

/// Find the configuration file starting from a specific directory.
pub fn find_config_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        for config_name in CONFIG_FILES {
            let config_path = current.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(home) = dirs::home_dir() {
        for config_name in CONFIG_FILES {
            let config_path = home.join(config_name);
            if config_path.exists() {
                return Some(config_path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let scribe_config = config_dir.join("scribe").join("config.toml");
        if scribe_config.exists() {
            return Some(scribe_config);
        }
    }

    None
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<ScribeConfig> {
    let config = match find_config_file() {
        Some(path) => read_config_file(&path)?,
        None => {
            tracing::debug!("No configuration file found, using defaults");
            ScribeConfig::default()
        }
    };
    finish(config)
}

/// Load configuration from a specific path.
pub fn load_config_from(path: &Path) -> Result<ScribeConfig> {
    let config = read_config_file(path)?;
    finish(config)
}

fn read_config_file(path: &Path) -> Result<ScribeConfig> {
    tracing::debug!("Loading configuration from: {:?}", path);

    if !path.exists() {
        return Err(ScribeError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
        }));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ScribeError::Config(ConfigError::ParseError {
            message: format!("Failed to read config file: {}", e),
        })
    })?;

    parse_config(&content)
}

fn finish(mut config: ScribeConfig) -> Result<ScribeConfig> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<ScribeConfig> {
    toml::from_str(content).map_err(|e| {
        ScribeError::Config(ConfigError::ParseError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })
}

/// Apply `SCRIBE_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut ScribeConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(ENV_LLM_HOST).filter(|v| !v.trim().is_empty()) {
        config.llm.host = host.trim().to_string();
    }
    if let Some(model) = lookup(ENV_LLM_MODEL).filter(|v| !v.trim().is_empty()) {
        config.llm.model = model.trim().to_string();
    }
    if let Some(enabled) = lookup(ENV_LLM_ENABLED) {
        config.llm.enabled = parse_flag(&enabled).ok_or_else(|| {
            ScribeError::Config(ConfigError::InvalidValue {
                key: ENV_LLM_ENABLED.to_string(),
                message: format!("expected a boolean, got '{}'", enabled),
            })
        })?;
    }
    Ok(())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Reject values the rest of the program cannot work with.
pub fn validate(config: &ScribeConfig) -> Result<()> {
    let invalid = |key: &str, message: &str| {
        Err(ScribeError::Config(ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        }))
    };

    if !config.llm.provider.eq_ignore_ascii_case("ollama") {
        return invalid("llm.provider", "only \"ollama\" is supported");
    }
    if config.llm.max_attempts == 0 {
        return invalid("llm.max_attempts", "must be at least 1");
    }
    if config.llm.timeout_secs == 0 {
        return invalid("llm.timeout_secs", "must be at least 1");
    }
    if !config.llm.temperature.is_finite() {
        return invalid("llm.temperature", "must be a finite number");
    }
    if config.synthesis.summary_max_chars == 0 {
        return invalid("synthesis.summary_max_chars", "must be at least 1");
    }
    if config.ui.box_min_width > config.ui.box_max_width {
        return invalid("ui.box_min_width", "must not exceed ui.box_max_width");
    }
    for pattern in &config.synthesis.ignored_paths {
        if let Err(e) = glob::Pattern::new(pattern) {
            return invalid("synthesis.ignored_paths", &format!("'{}': {}", pattern, e));
        }
    }
    Ok(())
}
