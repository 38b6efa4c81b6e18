//! Google Gemini `generateContent` protocol
//!
//! The API key travels as the `key` query parameter; the transport adds it.

use super::{Completion, ProviderAdapter, ResolvedOptions, Usage};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Adapter for Gemini
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiAdapter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

impl ProviderAdapter for GeminiAdapter {
    fn build_request(
        &self,
        _model: &str,
        prompt: &str,
        options: &ResolvedOptions<'_>,
    ) -> Result<Value> {
        Ok(serde_json::to_value(GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: options.system.map(|system| Content {
                role: None,
                parts: vec![Part { text: system }],
            }),
            generation_config: GenerationConfig {
                max_output_tokens: options.max_tokens,
                temperature: options.temperature,
            },
        })?)
    }

    fn parse_response(&self, body: &Value) -> Option<Completion> {
        let response: GenerateResponse = serde_json::from_value(body.clone()).ok()?;
        let parts = response.candidates.into_iter().next()?.content?.parts;

        let text: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            return None;
        }

        Some(Completion {
            content: text.join(""),
            usage: response.usage_metadata.map(|u| Usage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let body = GeminiAdapter
            .build_request(
                "gemini-1.5-flash",
                "List three services",
                &ResolvedOptions {
                    max_tokens: 300,
                    temperature: 0.9,
                    system: None,
                },
            )
            .unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "List three services");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 300);
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_parse_response() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": "[\"Fittings\"]"}], "role": "model"}}],
            "usageMetadata": {"promptTokenCount": 9, "candidatesTokenCount": 5, "totalTokenCount": 14}
        });
        let completion = GeminiAdapter.parse_response(&body).unwrap();
        assert_eq!(completion.content, "[\"Fittings\"]");
        assert_eq!(completion.usage.map(|u| u.total()), Some(14));
    }

    #[test]
    fn test_blocked_candidate_has_no_content() {
        let body = json!({"candidates": [{"finishReason": "SAFETY"}]});
        assert!(GeminiAdapter.parse_response(&body).is_none());
    }
}
