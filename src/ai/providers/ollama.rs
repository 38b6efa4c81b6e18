//! Ollama local generate protocol
//!
//! No authentication. Streaming is disabled so the server answers with a
//! single JSON object.

use super::{Completion, ProviderAdapter, ResolvedOptions, Usage};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Adapter for a local Ollama server
#[derive(Debug, Clone, Copy, Default)]
pub struct OllamaAdapter;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

impl ProviderAdapter for OllamaAdapter {
    fn build_request(
        &self,
        model: &str,
        prompt: &str,
        options: &ResolvedOptions<'_>,
    ) -> Result<Value> {
        Ok(serde_json::to_value(GenerateRequest {
            model,
            prompt,
            system: options.system,
            stream: false,
            options: OllamaOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        })?)
    }

    fn parse_response(&self, body: &Value) -> Option<Completion> {
        let response: GenerateResponse = serde_json::from_value(body.clone()).ok()?;

        let usage = match (response.prompt_eval_count, response.eval_count) {
            (None, None) => None,
            (input, output) => Some(Usage {
                input_tokens: input.unwrap_or(0),
                output_tokens: output.unwrap_or(0),
            }),
        };

        Some(Completion {
            content: response.response,
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_disables_streaming() {
        let body = OllamaAdapter
            .build_request(
                "llama3.1",
                "Write a tagline",
                &ResolvedOptions {
                    max_tokens: 64,
                    temperature: 0.2,
                    system: Some("Be brief."),
                },
            )
            .unwrap();
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["num_predict"], 64);
        assert_eq!(body["system"], "Be brief.");
    }

    #[test]
    fn test_parse_response() {
        let body = json!({"model": "llama3.1", "response": "Go further.", "done": true, "prompt_eval_count": 26, "eval_count": 3});
        let completion = OllamaAdapter.parse_response(&body).unwrap();
        assert_eq!(completion.content, "Go further.");
        assert_eq!(completion.usage.map(|u| u.total()), Some(29));
    }
}
