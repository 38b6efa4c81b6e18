//! HTTP transport shared by every provider protocol
//!
//! Builds the request with the provider's adapter, attaches credentials per
//! [`AuthMode`], and classifies the outcome:
//!
//! | Outcome | Error |
//! |---|---|
//! | 429, or any status whose error message mentions quota or rate limits | `ProviderRateLimited` (with `retry-after`) |
//! | 401 / 403 | `ProviderUnauthorized` |
//! | 5xx, network failure, timeout, malformed JSON | `ProviderTransient` |
//! | other 4xx | `ProviderRejected` |
//! | 200 with an error payload | by message: quota → rate limited, key → unauthorized, else transient |
//! | blank completion | `EmptyResponse` |

use super::anthropic::ANTHROPIC_VERSION;
use super::{
    adapter_for, default_payload_error, Completion, GenerationOptions, LLMProvider,
    ProviderAdapter, ResolvedOptions,
};
use crate::ai::config::{AuthMode, ProviderConfig, ProviderKind};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Provider reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpProvider {
    name: String,
    config: ProviderConfig,
    adapter: &'static dyn ProviderAdapter,
    client: Client,
}

impl HttpProvider {
    /// Create a provider from its catalog entry
    pub fn new(name: impl Into<String>, config: ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("sitesmith/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            name: name.into(),
            adapter: adapter_for(config.kind),
            config,
            client,
        })
    }

    /// Catalog entry
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }

    fn request_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.config.endpoint).map_err(|e| {
            Error::config(format!(
                "Provider '{}' has an invalid endpoint '{}': {}",
                self.name, self.config.endpoint, e
            ))
        })?;

        if self.config.auth_mode == AuthMode::QueryParam {
            url.query_pairs_mut().append_pair("key", self.api_key());
        }

        Ok(url)
    }

    fn status_error(&self, status: StatusCode, headers: &HeaderMap, body: &str) -> Error {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| self.adapter.payload_error(&v).or_else(|| default_payload_error(&v)))
            .unwrap_or_else(|| truncate(body, 200));

        if status == StatusCode::TOO_MANY_REQUESTS || mentions_rate_limit(&message) {
            let retry_after = headers
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            warn!(provider = %self.name, status = status.as_u16(), ?retry_after, "Provider rate limit hit");
            return Error::rate_limited(&self.name, retry_after);
        }

        match status.as_u16() {
            401 | 403 => Error::unauthorized(&self.name, message),
            s if s >= 500 => Error::transient(&self.name, format!("HTTP {}: {}", s, message)),
            s => Error::ProviderRejected {
                provider: self.name.clone(),
                status: s,
                message,
            },
        }
    }
}

/// Map an error message found in a 200 body to a provider error
pub fn classify_payload_error(provider: &str, message: &str) -> Error {
    let lowered = message.to_ascii_lowercase();
    let unauthorized = ["api key", "api_key", "apikey", "invalid key", "unauthorized", "authentication", "permission denied", "invalid token", "api token"];

    if mentions_rate_limit(message) {
        Error::rate_limited(provider, None)
    } else if unauthorized.iter().any(|m| lowered.contains(m)) {
        Error::unauthorized(provider, message)
    } else {
        Error::transient(provider, message)
    }
}

/// Whether an upstream error message reports a quota or rate limit
fn mentions_rate_limit(message: &str) -> bool {
    const MARKERS: [&str; 6] = ["quota", "rate limit", "rate_limit", "ratelimit", "too many requests", "resource_exhausted"];
    let lowered = message.to_ascii_lowercase();
    MARKERS.iter().any(|m| lowered.contains(m))
}

fn truncate(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[async_trait]
impl LLMProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        self.config.is_eligible()
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion> {
        let resolved = ResolvedOptions {
            max_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: options.temperature.unwrap_or(self.config.temperature),
            system: options.system.as_deref(),
        };
        let body = self.adapter.build_request(&self.config.model, prompt, &resolved)?;

        let mut request = self.client.post(self.request_url()?).json(&body);
        request = match self.config.auth_mode {
            AuthMode::Bearer => request.bearer_auth(self.api_key()),
            AuthMode::ApiKeyHeader => request.header("x-api-key", self.api_key()),
            AuthMode::QueryParam | AuthMode::None => request,
        };
        if self.config.kind == ProviderKind::Anthropic {
            request = request.header("anthropic-version", ANTHROPIC_VERSION);
        }

        debug!(provider = %self.name, model = %self.config.model, "Sending generation request");

        let response = request.send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                e.to_string()
            };
            Error::transient(&self.name, reason)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transient(&self.name, format!("failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(self.status_error(status, &headers, &text));
        }

        if text.trim().is_empty() {
            return Err(Error::EmptyResponse {
                provider: self.name.clone(),
            });
        }

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            Error::transient(&self.name, format!("malformed response body: {}", e))
        })?;

        if let Some(message) = self.adapter.payload_error(&value) {
            return Err(classify_payload_error(&self.name, &message));
        }

        let completion = self.adapter.parse_response(&value).ok_or_else(|| {
            Error::transient(&self.name, "response did not contain a completion")
        })?;

        if completion.content.trim().is_empty() {
            return Err(Error::EmptyResponse {
                provider: self.name.clone(),
            });
        }

        if let Some(usage) = completion.usage {
            debug!(
                provider = %self.name,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "Generation completed"
            );
        }

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_error_classification() {
        assert!(matches!(
            classify_payload_error("gemini", "Quota exceeded for quota metric"),
            Error::ProviderRateLimited { .. }
        ));
        assert!(matches!(
            classify_payload_error("openai", "Incorrect API key provided"),
            Error::ProviderUnauthorized { .. }
        ));
        assert!(matches!(
            classify_payload_error("huggingface", "Model is currently loading"),
            Error::ProviderTransient { .. }
        ));
    }

    #[test]
    fn test_status_error_reads_rate_limit_payload() {
        let mut config = crate::ai::config::AIConfig::default()
            .get_provider("openai")
            .cloned()
            .unwrap();
        config.api_key = Some("sk-test".to_string());
        let provider = HttpProvider::new("openai", config).unwrap();
        let headers = HeaderMap::new();

        let throttled = provider.status_error(
            StatusCode::SERVICE_UNAVAILABLE,
            &headers,
            r#"{"error":{"message":"Rate limit reached for requests"}}"#,
        );
        assert!(matches!(throttled, Error::ProviderRateLimited { .. }));

        let quota = provider.status_error(
            StatusCode::BAD_REQUEST,
            &headers,
            r#"{"error":{"message":"You exceeded your current quota"}}"#,
        );
        assert!(matches!(quota, Error::ProviderRateLimited { .. }));

        let outage = provider.status_error(StatusCode::SERVICE_UNAVAILABLE, &headers, "upstream down");
        assert!(matches!(outage, Error::ProviderTransient { .. }));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("  short  ", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_query_param_auth_url() {
        let config = crate::ai::config::AIConfig::default();
        let mut gemini = config.get_provider("gemini").cloned().unwrap();
        gemini.api_key = Some("AIza-test".to_string());
        let provider = HttpProvider::new("gemini", gemini).unwrap();
        let url = provider.request_url().unwrap();
        assert_eq!(url.query(), Some("key=AIza-test"));
    }
}
