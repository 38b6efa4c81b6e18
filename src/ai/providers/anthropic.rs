//! Anthropic messages protocol
//!
//! Authenticated with `x-api-key` plus an `anthropic-version` header (set by
//! the HTTP transport). The system instruction is a top-level field, not a
//! message.

use super::{Completion, ProviderAdapter, ResolvedOptions, Usage};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// API version header value
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Adapter for the Anthropic messages API
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicAdapter;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<MessagesUsage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct MessagesUsage {
    input_tokens: u32,
    output_tokens: u32,
}

impl ProviderAdapter for AnthropicAdapter {
    fn build_request(
        &self,
        model: &str,
        prompt: &str,
        options: &ResolvedOptions<'_>,
    ) -> Result<Value> {
        Ok(serde_json::to_value(MessagesRequest {
            model,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            system: options.system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        })?)
    }

    fn parse_response(&self, body: &Value) -> Option<Completion> {
        let response: MessagesResponse = serde_json::from_value(body.clone()).ok()?;

        let text: Vec<String> = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();
        if text.is_empty() {
            return None;
        }

        Some(Completion {
            content: text.join(""),
            usage: response.usage.map(|u| Usage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
        })
    }

    fn payload_error(&self, body: &Value) -> Option<String> {
        if body.get("type").and_then(Value::as_str) == Some("error") {
            return super::default_payload_error(body)
                .or_else(|| Some("unknown error".to_string()));
        }
        super::default_payload_error(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_system_is_top_level() {
        let body = AnthropicAdapter
            .build_request(
                "claude-3-5-haiku-latest",
                "Write an about section",
                &ResolvedOptions {
                    max_tokens: 512,
                    temperature: 0.4,
                    system: Some("Be concise."),
                },
            )
            .unwrap();
        assert_eq!(body["system"], "Be concise.");
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["messages"][0]["content"], "Write an about section");
    }

    #[test]
    fn test_parse_joins_text_blocks() {
        let body = json!({
            "type": "message",
            "content": [
                {"type": "text", "text": "Built for "},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "runners."}
            ],
            "usage": {"input_tokens": 20, "output_tokens": 4}
        });
        let completion = AnthropicAdapter.parse_response(&body).unwrap();
        assert_eq!(completion.content, "Built for runners.");
        assert_eq!(completion.usage.map(|u| u.input_tokens), Some(20));
    }

    #[test]
    fn test_error_payload() {
        let body = json!({
            "type": "error",
            "error": {"type": "rate_limit_error", "message": "Rate limit reached"}
        });
        assert_eq!(
            AnthropicAdapter.payload_error(&body).as_deref(),
            Some("Rate limit reached")
        );
    }
}
