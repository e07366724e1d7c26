// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Structured commit content.

use crate::analysis::{Classification, DiffStats};
use crate::config::CommitType;
use crate::llm::ModelReply;
use serde_json::Value;

use super::render::{render_parts, RenderedMessage};

/// A commit message before rendering, from heuristics or a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDraft {
    pub commit_type: CommitType,
    pub scope: Option<String>,
    pub summary: String,
    pub body: Option<String>,
    pub breaking: bool,
}

impl CommitDraft {
    /// The draft built purely from classification and line counts.
    pub fn heuristic(classification: &Classification, stats: DiffStats, max_chars: usize) -> Self {
        Self {
            commit_type: classification.commit_type,
            scope: classification.scope.clone(),
            summary: truncate_summary(&format!("auto summary [{}]", stats.shorthand()), max_chars),
            body: None,
            breaking: false,
        }
    }

    /// Validate a model reply field by field, falling back to `heuristic` for
    /// anything missing or unusable.
    pub fn from_reply(reply: &ModelReply, heuristic: &CommitDraft, max_chars: usize) -> Self {
        let commit_type = text_field(reply, "type")
            .and_then(|t| t.parse::<CommitType>().ok())
            .unwrap_or(heuristic.commit_type);

        let scope = text_field(reply, "scope").or_else(|| heuristic.scope.clone());

        let summary = text_field(reply, "summary").unwrap_or_else(|| heuristic.summary.clone());

        let body = match reply.get("body") {
            Some(Value::String(body)) if !body.trim().is_empty() => Some(body.trim().to_string()),
            _ => None,
        };

        Self {
            commit_type,
            scope,
            summary: truncate_summary(&summary, max_chars),
            body,
            breaking: reply.get("breaking").map(truthy).unwrap_or(false),
        }
    }

    /// Render to final commit text.
    pub fn render(&self) -> RenderedMessage {
        render_parts(
            self.commit_type.as_str(),
            self.scope.as_deref(),
            self.breaking,
            &self.summary,
            self.body.as_deref(),
        )
    }
}

/// Keep at most `max_chars` characters.
pub fn truncate_summary(summary: &str, max_chars: usize) -> String {
    summary.trim().chars().take(max_chars).collect()
}

/// A scalar field coerced to trimmed text; blank counts as missing.
fn text_field(reply: &ModelReply, key: &str) -> Option<String> {
    let text = match reply.get(key)? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "1"),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn heuristic() -> CommitDraft {
        let classification = Classification {
            commit_type: CommitType::Fix,
            scope: Some("core".to_string()),
        };
        CommitDraft::heuristic(&classification, DiffStats { added: 3, removed: 1 }, 72)
    }

    fn reply(value: serde_json::Value) -> ModelReply {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_heuristic_draft() {
        let draft = heuristic();
        assert_eq!(draft.summary, "auto summary [+3/-1]");
        assert_eq!(draft.render().as_str(), "fix(core): auto summary [+3/-1]\n");
    }

    #[test]
    fn test_full_reply() {
        let draft = CommitDraft::from_reply(
            &reply(json!({
                "type": "feat",
                "scope": "api",
                "summary": "add endpoint",
                "body": "  Adds GET /health.  ",
                "breaking": false
            })),
            &heuristic(),
            72,
        );
        assert_eq!(draft.commit_type, CommitType::Feat);
        assert_eq!(draft.render().as_str(), "feat(api): add endpoint\n\nAdds GET /health.\n");
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let draft = CommitDraft::from_reply(&reply(json!({})), &heuristic(), 72);
        assert_eq!(draft, heuristic());
    }

    #[test]
    fn test_unknown_type_falls_back_to_heuristic() {
        let draft = CommitDraft::from_reply(&reply(json!({"type": "wip"})), &heuristic(), 72);
        assert_eq!(draft.commit_type, CommitType::Fix);
    }

    #[test]
    fn test_blank_scope_uses_heuristic_scope() {
        let draft = CommitDraft::from_reply(&reply(json!({"scope": "  "})), &heuristic(), 72);
        assert_eq!(draft.scope.as_deref(), Some("core"));
    }

    #[test]
    fn test_long_summary_truncated_to_exactly_72() {
        let long = "x".repeat(100);
        let draft = CommitDraft::from_reply(&reply(json!({"summary": long})), &heuristic(), 72);
        assert_eq!(draft.summary.chars().count(), 72);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let summary = "é".repeat(80);
        assert_eq!(truncate_summary(&summary, 72).chars().count(), 72);
    }

    #[test]
    fn test_non_string_body_is_absent() {
        let draft = CommitDraft::from_reply(&reply(json!({"body": ["a", "b"]})), &heuristic(), 72);
        assert!(draft.body.is_none());
        let draft = CommitDraft::from_reply(&reply(json!({"body": "   "})), &heuristic(), 72);
        assert!(draft.body.is_none());
    }

    #[test]
    fn test_breaking_coercion() {
        let h = heuristic();
        assert!(CommitDraft::from_reply(&reply(json!({"breaking": true})), &h, 72).breaking);
        assert!(CommitDraft::from_reply(&reply(json!({"breaking": "yes"})), &h, 72).breaking);
        assert!(CommitDraft::from_reply(&reply(json!({"breaking": 1})), &h, 72).breaking);
        assert!(!CommitDraft::from_reply(&reply(json!({"breaking": "false"})), &h, 72).breaking);
        assert!(!CommitDraft::from_reply(&reply(json!({"breaking": null})), &h, 72).breaking);
    }
}
