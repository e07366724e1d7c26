// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Blocking HTTP client for an Ollama-compatible `/api/chat` endpoint.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::LlmConfig;
use crate::error::ModelError;

use super::retry::RetryPolicy;

lazy_static! {
    /// Markdown code fences a model may wrap its JSON in.
    static ref CODE_FENCE: Regex = Regex::new(r"(?i)```(?:json)?").unwrap();
}

/// The loosely-typed fields a model returned for a commit draft.
///
/// Nothing about the shape is trusted yet; the synthesizer validates and
/// defaults every field.
pub type ModelReply = Map<String, Value>;

/// Something that can turn a prompt pair into a model reply.
pub trait DraftModel {
    /// Ask for one commit draft. Implementations own their retry policy.
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<ModelReply, ModelError>;
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    stream: bool,
    options: ChatOptions,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ChatResponseMessage {
    content: String,
}

/// Client for a local Ollama instance.
pub struct OllamaClient {
    http: Client,
    url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout_secs: u64,
    retry: RetryPolicy,
}

impl OllamaClient {
    /// Build a client from the `[llm]` configuration table.
    pub fn from_config(config: &LlmConfig) -> Result<Self, ModelError> {
        let url = format!("{}/api/chat", config.host.trim_end_matches('/'));
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout_secs: config.timeout_secs,
            retry: RetryPolicy::from_config(config),
        })
    }

    /// The full endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn request_body<'a>(&'a self, system_prompt: &'a str, user_prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        }
    }

    /// One request/response round trip, no retries.
    fn attempt(&self, body: &ChatRequest<'_>) -> Result<ModelReply, ModelError> {
        let response = self
            .http
            .post(&self.url)
            .json(body)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ModelError::Envelope {
                message: e.to_string(),
            })?;

        parse_reply(&envelope.message.content)
    }

    fn transport_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout {
                url: self.url.clone(),
                seconds: self.timeout_secs,
            }
        } else {
            ModelError::Transport {
                url: self.url.clone(),
                message: err.to_string(),
            }
        }
    }
}

impl DraftModel for OllamaClient {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<ModelReply, ModelError> {
        let body = self.request_body(system_prompt, user_prompt);
        tracing::debug!(
            url = %self.url,
            model = %self.model,
            prompt_len = user_prompt.len(),
            "requesting commit draft"
        );
        self.retry.run(|_| self.attempt(&body))
    }
}

/// Parse the `message.content` string into a JSON object.
pub fn parse_reply(content: &str) -> Result<ModelReply, ModelError> {
    let stripped = strip_code_fence(content);
    match serde_json::from_str::<Value>(&stripped) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ModelError::MalformedDraft {
            message: format!("expected an object, got {}", kind_of(&other)),
        }),
        Err(e) => Err(ModelError::MalformedDraft {
            message: e.to_string(),
        }),
    }
}

/// Remove markdown code fences around a reply.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.contains("```") {
        CODE_FENCE.replace_all(trimmed, "").trim().to_string()
    } else {
        trimmed.to_string()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config_for(server: &Server) -> LlmConfig {
        LlmConfig {
            host: format!("{}/", server.url()),
            timeout_secs: 5,
            backoff_step_secs: 0,
            ..LlmConfig::default()
        }
    }

    fn chat_body(content: &str) -> String {
        json!({
            "model": "phi3.5:3.8b",
            "message": { "role": "assistant", "content": content },
            "done": true
        })
        .to_string()
    }

    #[test]
    fn test_strip_code_fence() {
        let fenced = "```json\n{\"type\": \"fix\"}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"type\": \"fix\"}");
        assert_eq!(strip_code_fence("  {\"a\": 1} "), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
    }

    #[test]
    fn test_parse_reply_rejects_non_objects() {
        assert!(parse_reply("[1, 2]").is_err());
        assert!(parse_reply("not json").is_err());
        assert!(parse_reply("{\"summary\": \"x\"}").is_ok());
    }

    #[test]
    fn test_request_shape_and_success() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::PartialJson(json!({
                "model": "phi3.5:3.8b",
                "stream": false,
                "options": { "num_predict": 256 },
                "messages": [
                    { "role": "system", "content": "sys" },
                    { "role": "user", "content": "usr" }
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(chat_body(
                "```json\n{\"type\": \"feat\", \"summary\": \"add endpoint\"}\n```",
            ))
            .expect(1)
            .create();

        let client = OllamaClient::from_config(&config_for(&server)).unwrap();
        assert!(client.url().ends_with("/api/chat"));
        assert!(!client.url().contains("//api"));

        let reply = client.generate("sys", "usr").unwrap();
        assert_eq!(reply["type"], "feat");
        assert_eq!(reply["summary"], "add endpoint");
        mock.assert();
    }

    #[test]
    fn test_server_errors_exhaust_three_attempts() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("model not loaded")
            .expect(3)
            .create();

        let client = OllamaClient::from_config(&config_for(&server)).unwrap();
        let err = client.generate("sys", "usr").unwrap_err();

        match err {
            ModelError::AttemptsExhausted { attempts, last } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*last, ModelError::Status { status: 500, .. }));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        mock.assert();
    }

    #[test]
    fn test_malformed_content_counts_as_failed_attempt() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(chat_body("Sure! Here is your commit message: feat: stuff"))
            .expect(3)
            .create();

        let client = OllamaClient::from_config(&config_for(&server)).unwrap();
        let err = client.generate("sys", "usr").unwrap_err();
        assert!(matches!(err, ModelError::AttemptsExhausted { .. }));
        mock.assert();
    }

    #[test]
    fn test_recovers_on_second_attempt() {
        let mut server = Server::new();
        let calls = AtomicUsize::new(0);
        let first_bad = chat_body("not json at all");
        let then_good = chat_body("{\"type\": \"fix\", \"summary\": \"handle panic\"}");

        let mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body_from_request(move |_| {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    first_bad.clone().into_bytes()
                } else {
                    then_good.clone().into_bytes()
                }
            })
            .expect(2)
            .create();

        let client = OllamaClient::from_config(&config_for(&server)).unwrap();
        let reply = client.generate("sys", "usr").unwrap();
        assert_eq!(reply["summary"], "handle panic");
        mock.assert();
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        let config = LlmConfig {
            host: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            max_attempts: 1,
            backoff_step_secs: 0,
            ..LlmConfig::default()
        };
        let client = OllamaClient::from_config(&config).unwrap();
        match client.generate("sys", "usr") {
            Err(ModelError::AttemptsExhausted { attempts: 1, last }) => {
                assert!(matches!(
                    *last,
                    ModelError::Transport { .. } | ModelError::Timeout { .. }
                ));
            }
            other => panic!("expected a failed attempt, got {:?}", other),
        }
    }
}
