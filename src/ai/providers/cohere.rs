//! Cohere generate protocol: one `prompt` field, `generations[0].text`

use super::{inline_system, Completion, ProviderAdapter, ResolvedOptions, Usage};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Adapter for Cohere
#[derive(Debug, Clone, Copy, Default)]
pub struct CohereAdapter;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    generations: Vec<Generation>,
    meta: Option<Meta>,
}

#[derive(Deserialize)]
struct Generation {
    text: String,
}

#[derive(Deserialize)]
struct Meta {
    billed_units: Option<BilledUnits>,
}

#[derive(Deserialize)]
struct BilledUnits {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

impl ProviderAdapter for CohereAdapter {
    fn build_request(
        &self,
        model: &str,
        prompt: &str,
        options: &ResolvedOptions<'_>,
    ) -> Result<Value> {
        Ok(serde_json::to_value(GenerateRequest {
            model,
            prompt: inline_system(prompt, options.system),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        })?)
    }

    fn parse_response(&self, body: &Value) -> Option<Completion> {
        let response: GenerateResponse = serde_json::from_value(body.clone()).ok()?;
        let text = response.generations.into_iter().next()?.text;

        Some(Completion {
            content: text,
            usage: response.meta.and_then(|m| m.billed_units).map(|b| Usage {
                input_tokens: b.input_tokens,
                output_tokens: b.output_tokens,
            }),
        })
    }

    fn payload_error(&self, body: &Value) -> Option<String> {
        // Cohere reports failures as {"message": "..."} without generations
        if body.get("generations").is_none() {
            if let Some(message) = body.get("message").and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
        super::default_payload_error(body)
    }
}
