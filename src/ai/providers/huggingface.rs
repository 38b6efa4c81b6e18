//! Hugging Face inference protocol: `inputs` in, `[{generated_text}]` out

use super::{inline_system, Completion, ProviderAdapter, ResolvedOptions};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Adapter for the Hugging Face inference API
#[derive(Debug, Clone, Copy, Default)]
pub struct HuggingFaceAdapter;

#[derive(Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

impl ProviderAdapter for HuggingFaceAdapter {
    fn build_request(
        &self,
        _model: &str,
        prompt: &str,
        options: &ResolvedOptions<'_>,
    ) -> Result<Value> {
        Ok(serde_json::to_value(InferenceRequest {
            inputs: inline_system(prompt, options.system),
            parameters: Parameters {
                max_new_tokens: options.max_tokens,
                temperature: options.temperature,
                return_full_text: false,
            },
        })?)
    }

    fn parse_response(&self, body: &Value) -> Option<Completion> {
        // Either a list of generations or a single object
        let first = match body {
            Value::Array(items) => items.first()?.clone(),
            other => other.clone(),
        };
        let generated: GeneratedText = serde_json::from_value(first).ok()?;
        Some(Completion::text(generated.generated_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let body = HuggingFaceAdapter
            .build_request(
                "mistral",
                "Describe the shop",
                &ResolvedOptions {
                    max_tokens: 120,
                    temperature: 0.6,
                    system: None,
                },
            )
            .unwrap();
        assert_eq!(body["inputs"], "Describe the shop");
        assert_eq!(body["parameters"]["max_new_tokens"], 120);
        assert_eq!(body["parameters"]["return_full_text"], false);
    }

    #[test]
    fn test_parse_list_and_object() {
        let list = json!([{"generated_text": "Shoes for every mile."}]);
        assert_eq!(
            HuggingFaceAdapter.parse_response(&list).map(|c| c.content),
            Some("Shoes for every mile.".to_string())
        );
        let object = json!({"generated_text": "Hi"});
        assert!(HuggingFaceAdapter.parse_response(&object).is_some());
        assert!(HuggingFaceAdapter.parse_response(&json!([])).is_none());
    }

    #[test]
    fn test_loading_model_error() {
        let body = json!({"error": "Model is currently loading", "estimated_time": 20.0});
        assert_eq!(
            HuggingFaceAdapter.payload_error(&body).as_deref(),
            Some("Model is currently loading")
        );
    }
}
