// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Prompt construction for commit message generation.
//!
//! The prompt is bounded: the file list is filtered and capped, and the diff
//! is cut at a character budget.

use std::borrow::Cow;
use std::path::Path;

use handlebars::Handlebars;
use serde_json::json;

use crate::analysis::{Classification, DiffInput, DiffStats};
use crate::config::SynthesisConfig;
use crate::error::ModelError;

/// Appended to a diff that was cut at the character budget.
pub const TRUNCATION_MARKER: &str = "\n...[truncated]";

/// System prompt sent with every request.
pub const SYSTEM_PROMPT: &str = "You are a senior developer. Generate concise Conventional Commit messages. \
Header must be <= 72 chars (no trailing dot). Body is optional. \
Respond ONLY with valid JSON (no markdown, no commentary).";

const USER_TEMPLATE: &str = r#"Heuristics:
- type="{{commit_type}}"
- scope="{{scope}}"

Stats: {{stats}}

Changed files:
{{files}}

Truncated diff:
{{diff}}

Return JSON in this exact format (NO extra text):
{
  "type": "feat|fix|docs|refactor|test|chore|build|ci|perf|style",
  "scope": "string or empty",
  "summary": "one line <=72 chars, no period at end",
  "body": "",
  "breaking": false
}
Only JSON. No commentary.
"#;

/// Render the user prompt for one synthesis run.
pub fn build_user_prompt(
    heuristic: &Classification,
    stats: DiffStats,
    input: &DiffInput,
    config: &SynthesisConfig,
) -> Result<String, ModelError> {
    let files = filter_files(input.files(), config)
        .iter()
        .map(|path| format!("- {}", path))
        .collect::<Vec<_>>()
        .join("\n");

    let data = json!({
        "commit_type": heuristic.commit_type.as_str(),
        "scope": heuristic.scope.as_deref().unwrap_or(""),
        "stats": stats.shorthand(),
        "files": files,
        "diff": truncate_diff(input.diff(), config.max_diff_chars),
    });

    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .render_template(USER_TEMPLATE, &data)
        .map_err(|e| ModelError::Prompt {
            message: e.to_string(),
        })
}

/// Keep the paths worth showing the model, at most `max_files` of them.
///
/// Build-artifact and cache paths are dropped, as are files whose extension
/// is not in the text allow-list. Files without an extension are kept.
pub fn filter_files<'a>(files: &'a [String], config: &SynthesisConfig) -> Vec<&'a str> {
    let ignored: Vec<glob::Pattern> = config
        .ignored_paths
        .iter()
        .filter_map(|p| glob::Pattern::new(p).ok())
        .collect();

    files
        .iter()
        .map(String::as_str)
        .filter(|path| !ignored.iter().any(|pattern| pattern.matches(path)))
        .filter(|path| match Path::new(path).extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                config
                    .text_extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&ext))
            }
            None => true,
        })
        .take(config.max_files)
        .collect()
}

/// Cut `diff` to `max_chars` characters, marking the cut.
pub fn truncate_diff(diff: &str, max_chars: usize) -> Cow<'_, str> {
    match diff.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &diff[..cut], TRUNCATION_MARKER)),
        None => Cow::Borrowed(diff),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommitType;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_drops_artifacts_and_binaries() {
        let files = paths(&[
            "src/lib.rs",
            "pkg/__pycache__/mod.cpython-311.pyc",
            "pkg.egg-info/PKG-INFO",
            "web/node_modules/left-pad/index.js",
            "target/debug/build.log",
            "assets/logo.png",
            "Makefile",
            "README.MD",
        ]);
        let kept = filter_files(&files, &SynthesisConfig::default());
        assert_eq!(kept, vec!["src/lib.rs", "Makefile", "README.MD"]);
    }

    #[test]
    fn test_filter_caps_list() {
        let files: Vec<String> = (0..50).map(|i| format!("src/file{}.rs", i)).collect();
        let kept = filter_files(&files, &SynthesisConfig::default());
        assert_eq!(kept.len(), 30);
        assert_eq!(kept[0], "src/file0.rs");
    }

    #[test]
    fn test_truncate_short_diff_untouched() {
        let diff = "+a\n-b";
        let cut = truncate_diff(diff, 4000);
        assert!(matches!(cut, Cow::Borrowed(_)));
        assert_eq!(cut, diff);
    }

    #[test]
    fn test_truncate_long_diff() {
        let diff = "x".repeat(4100);
        let cut = truncate_diff(&diff, 4000);
        assert!(cut.ends_with(TRUNCATION_MARKER));
        assert_eq!(cut.len(), 4000 + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let cut = truncate_diff("ééé", 2);
        assert_eq!(cut, format!("éé{}", TRUNCATION_MARKER));
    }

    #[test]
    fn test_prompt_contents() {
        let input = DiffInput::new(
            "+fn main() {}\n",
            paths(&["src/main.rs", "logo.png"]),
        );
        let heuristic = Classification {
            commit_type: CommitType::Feat,
            scope: Some("src".to_string()),
        };
        let stats = DiffStats {
            added: 1,
            removed: 0,
        };

        let prompt =
            build_user_prompt(&heuristic, stats, &input, &SynthesisConfig::default()).unwrap();

        assert!(prompt.contains("- type=\"feat\""));
        assert!(prompt.contains("- scope=\"src\""));
        assert!(prompt.contains("Stats: +1/-0"));
        assert!(prompt.contains("- src/main.rs"));
        assert!(!prompt.contains("logo.png"));
        assert!(prompt.contains("+fn main() {}"));
        assert!(prompt.contains("\"breaking\": false"));
    }

    #[test]
    fn test_prompt_does_not_html_escape() {
        let input = DiffInput::new("+if a < b && c > d {}", Vec::new());
        let heuristic = Classification {
            commit_type: CommitType::Fix,
            scope: None,
        };
        let prompt = build_user_prompt(
            &heuristic,
            DiffStats::default(),
            &input,
            &SynthesisConfig::default(),
        )
        .unwrap();
        assert!(prompt.contains("a < b && c > d"));
        assert!(prompt.contains("- scope=\"\""));
    }
}
