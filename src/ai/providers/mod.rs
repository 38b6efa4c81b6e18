//! LLM provider abstraction layer
//!
//! Two seams live here:
//!
//! - [`LLMProvider`]: something that turns a prompt into a [`Completion`].
//!   [`HttpProvider`] is the production implementation; tests substitute
//!   scripted providers.
//! - [`ProviderAdapter`]: the per-protocol request builder and response
//!   parser used by [`HttpProvider`]. Adapters are looked up from the
//!   provider's [`ProviderKind`] with [`adapter_for`].
//!
//! # Supported protocols
//!
//! - **OpenAI compatible**: OpenAI, Groq, DeepSeek (`choices[0].message.content`)
//! - **Anthropic**: messages API (`content[].text`)
//! - **Gemini**: `generateContent` (`candidates[0].content.parts[].text`)
//! - **Cohere**: generate API (`generations[0].text`)
//! - **Hugging Face**: inference API (`[{generated_text}]`)
//! - **Ollama**: local `/api/generate` (`response`)

use crate::ai::config::ProviderKind;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod anthropic;
pub mod cohere;
pub mod gemini;
pub mod http;
pub mod huggingface;
pub mod ollama;
pub mod openai;

pub use anthropic::AnthropicAdapter;
pub use cohere::CohereAdapter;
pub use gemini::GeminiAdapter;
pub use http::HttpProvider;
pub use huggingface::HuggingFaceAdapter;
pub use ollama::OllamaAdapter;
pub use openai::OpenAiCompatAdapter;

/// Options for one generation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Completion token limit; the provider default when `None`
    pub max_tokens: Option<u32>,
    /// Sampling temperature; the provider default when `None`
    pub temperature: Option<f32>,
    /// System instruction, sent natively where the protocol supports it
    pub system: Option<String>,
}

/// Token accounting reported by a provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Prompt tokens
    pub input_tokens: u32,
    /// Generated tokens
    pub output_tokens: u32,
}

impl Usage {
    /// Input plus output
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Normalized provider output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text
    pub content: String,
    /// Token usage, when reported
    pub usage: Option<Usage>,
}

impl Completion {
    /// Completion without usage data
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }
}

/// Anything that can complete a prompt
///
/// Implementations classify their own failures into the provider error
/// variants of [`crate::Error`] so the failover loop can act on them.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Catalog name of the provider
    fn name(&self) -> &str;

    /// Whether the provider is configured well enough to be called
    fn is_available(&self) -> bool;

    /// Complete a prompt
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion>;
}

/// Request/response shape of one provider protocol
pub trait ProviderAdapter: Send + Sync + std::fmt::Debug {
    /// JSON body for a request
    fn build_request(
        &self,
        model: &str,
        prompt: &str,
        options: &ResolvedOptions<'_>,
    ) -> Result<Value>;

    /// Extract the completion from a success body; `None` when the expected
    /// fields are missing
    fn parse_response(&self, body: &Value) -> Option<Completion>;

    /// Error message embedded in an otherwise successful body
    fn payload_error(&self, body: &Value) -> Option<String> {
        default_payload_error(body)
    }
}

/// Options with provider defaults applied
#[derive(Debug, Clone, Copy)]
pub struct ResolvedOptions<'a> {
    /// Completion token limit
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// System instruction
    pub system: Option<&'a str>,
}

/// Adapter for a protocol family
pub fn adapter_for(kind: ProviderKind) -> &'static dyn ProviderAdapter {
    match kind {
        ProviderKind::OpenaiCompat => &OpenAiCompatAdapter,
        ProviderKind::Anthropic => &AnthropicAdapter,
        ProviderKind::Gemini => &GeminiAdapter,
        ProviderKind::Cohere => &CohereAdapter,
        ProviderKind::Huggingface => &HuggingFaceAdapter,
        ProviderKind::Ollama => &OllamaAdapter,
    }
}

/// `{"error": "..."}` or `{"error": {"message": "..."}}`
pub(crate) fn default_payload_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| Some(Value::Object(map.clone()).to_string())),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Prepend the system instruction for protocols with a single prompt field
pub(crate) fn inline_system(prompt: &str, system: Option<&str>) -> String {
    match system {
        Some(system) if !system.trim().is_empty() => format!("{}\n\n{}", system.trim(), prompt),
        _ => prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_error_shapes() {
        assert_eq!(
            default_payload_error(&json!({"error": "quota exceeded"})).as_deref(),
            Some("quota exceeded")
        );
        assert_eq!(
            default_payload_error(&json!({"error": {"message": "bad key", "type": "auth"}}))
                .as_deref(),
            Some("bad key")
        );
        assert_eq!(default_payload_error(&json!({"error": null})), None);
        assert_eq!(default_payload_error(&json!({"choices": []})), None);
    }

    #[test]
    fn test_inline_system() {
        assert_eq!(inline_system("prompt", None), "prompt");
        assert_eq!(inline_system("prompt", Some("  ")), "prompt");
        assert_eq!(inline_system("prompt", Some("Be brief")), "Be brief\n\nprompt");
    }

    #[test]
    fn test_every_kind_has_an_adapter() {
        let options = ResolvedOptions {
            max_tokens: 64,
            temperature: 0.5,
            system: Some("system"),
        };
        for kind in [
            ProviderKind::OpenaiCompat,
            ProviderKind::Anthropic,
            ProviderKind::Gemini,
            ProviderKind::Cohere,
            ProviderKind::Huggingface,
            ProviderKind::Ollama,
        ] {
            let body = adapter_for(kind).build_request("model", "hello", &options).unwrap();
            assert!(body.is_object(), "{kind:?}");
            assert!(body.to_string().contains("hello"), "{kind:?}");
        }
    }

    #[test]
    fn test_usage_total() {
        let usage = Usage {
            input_tokens: 10,
            output_tokens: 32,
        };
        assert_eq!(usage.total(), 42);
    }
}
