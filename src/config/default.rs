// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::ScribeConfig;

/// Get the default configuration.
pub fn default_config() -> ScribeConfig {
    ScribeConfig::default()
}

/// Generate an example configuration file.
pub fn example_config() -> &'static str {
    r#"# scribe configuration file

# Local language model (Ollama-compatible /api/chat endpoint)
[llm]
enabled = true
provider = "ollama"
model = "phi3.5:3.8b"
temperature = 0.1
max_tokens = 256
host = "http://localhost:11434"
timeout_secs = 180
max_attempts = 3
backoff_step_secs = 1

# Message synthesis
[synthesis]
# "first_dir" uses the first path segment of the first staged file, "none" disables scopes
scope_mode = "first_dir"
max_files = 30
max_diff_chars = 4000
summary_max_chars = 72
text_extensions = ["rs", "py", "ts", "tsx", "js", "jsx", "go", "java", "c", "h", "cpp", "hpp", "sh", "sql", "json", "toml", "md", "yml", "yaml", "ini", "txt", "css", "html"]
ignored_paths = ["**/__pycache__/**", "**/*.egg-info/**", "**/node_modules/**", "target/**", "dist/**"]

# Review box
[ui]
color = true
box_min_width = 10
box_max_width = 110
box_padding = 1
"#
}
