//! OpenAI chat completions protocol
//!
//! Also spoken by Groq and DeepSeek, which differ only in endpoint and model.

use super::{Completion, ProviderAdapter, ResolvedOptions, Usage};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Adapter for OpenAI-compatible chat completion APIs
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiCompatAdapter;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ProviderAdapter for OpenAiCompatAdapter {
    fn build_request(
        &self,
        model: &str,
        prompt: &str,
        options: &ResolvedOptions<'_>,
    ) -> Result<Value> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = options.system {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.push(Message {
            role: "user",
            content: prompt,
        });

        Ok(serde_json::to_value(ChatRequest {
            model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        })?)
    }

    fn parse_response(&self, body: &Value) -> Option<Completion> {
        let response: ChatResponse = serde_json::from_value(body.clone()).ok()?;
        let content = response.choices.into_iter().next()?.message.content?;

        Some(Completion {
            content,
            usage: response.usage.map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> ResolvedOptions<'static> {
        ResolvedOptions {
            max_tokens: 256,
            temperature: 0.7,
            system: Some("You write website copy."),
        }
    }

    #[test]
    fn test_request_shape() {
        let body = OpenAiCompatAdapter
            .build_request("gpt-4o-mini", "Write a tagline", &options())
            .unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "Write a tagline");
    }

    #[test]
    fn test_parse_response_with_usage() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "Run further."}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        });
        let completion = OpenAiCompatAdapter.parse_response(&body).unwrap();
        assert_eq!(completion.content, "Run further.");
        assert_eq!(completion.usage.map(|u| u.total()), Some(15));
    }

    #[test]
    fn test_parse_response_without_choices() {
        assert!(OpenAiCompatAdapter.parse_response(&json!({"choices": []})).is_none());
        assert!(OpenAiCompatAdapter
            .parse_response(&json!({"choices": [{"message": {"content": null}}]}))
            .is_none());
    }
}
