//! Multi-provider client
//!
//! Wraps the [`ProviderRegistry`] with client-side rate limiting and the
//! retry-then-failover loop of [`FailoverPolicy`].

use super::config::AIConfig;
use super::failover::{FailoverPolicy, FailoverScope, Transition, Trying};
use super::providers::{Completion, GenerationOptions, LLMProvider};
use super::registry::ProviderRegistry;
use super::retry::RetryConfig;
use crate::error::{Error, Result};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

type ProviderRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Successful generation with its provenance
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    /// Provider output
    pub completion: Completion,
    /// Provider that produced it
    pub provider: String,
    /// Attempts made, including the successful one
    pub attempts: usize,
}

/// Client over every configured provider
#[derive(Debug)]
pub struct AIClient {
    registry: Arc<ProviderRegistry>,
    policy: FailoverPolicy,
    limiters: HashMap<String, Arc<ProviderRateLimiter>>,
}

impl AIClient {
    /// Create a client over a registry
    pub fn new(registry: Arc<ProviderRegistry>, retry: RetryConfig) -> Self {
        let limiters = registry
            .iter()
            .filter_map(|(name, entry)| {
                entry.rate_limit_per_minute.map(|limit| {
                    (name.clone(), Arc::new(RateLimiter::direct(Quota::per_minute(limit))))
                })
            })
            .collect();

        Self {
            registry,
            policy: FailoverPolicy::new(retry),
            limiters,
        }
    }

    /// Build HTTP providers from configuration
    pub fn from_config(config: &AIConfig) -> Result<Self> {
        let registry = ProviderRegistry::from_config(config)?;
        Ok(Self::new(Arc::new(registry), config.retry.clone()))
    }

    /// Underlying registry
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Whether any provider could be called
    pub fn has_available_provider(&self) -> bool {
        self.registry.has_available()
    }

    /// First usable provider by priority, see [`ProviderRegistry::select_provider`]
    pub fn select_provider(
        &self,
        priority: &[String],
        excluding: &HashSet<String>,
    ) -> Option<Arc<dyn LLMProvider>> {
        self.registry.select_provider(priority, excluding)
    }

    /// One attempt against a named provider, no retries
    pub async fn call(
        &self,
        provider_key: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let entry = self
            .registry
            .get(provider_key)
            .ok_or_else(|| Error::config(format!("Unknown provider '{}'", provider_key)))?;

        if !entry.provider.is_available() {
            return Err(Error::unauthorized(provider_key, "no usable API key configured"));
        }

        self.attempt(entry.provider.as_ref(), prompt, options).await
    }

    async fn attempt(
        &self,
        provider: &dyn LLMProvider,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Completion> {
        if let Some(limiter) = self.limiters.get(provider.name()) {
            if limiter.check().is_err() {
                debug!(provider = provider.name(), "Local rate limit exhausted");
                return Err(Error::rate_limited(provider.name(), None));
            }
        }

        provider.generate(prompt, options).await
    }

    /// Generate with retries and failover
    ///
    /// Tries up to `max_providers` distinct providers, each up to
    /// `attempts_per_provider` times. Providers in `scope` are skipped, and
    /// providers that fail with a non-retryable error are added to it.
    pub async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
        scope: Option<&FailoverScope>,
    ) -> Result<GenerationResponse> {
        let priority = self.registry.priority();
        let mut tried: HashSet<String> = scope.map(FailoverScope::snapshot).unwrap_or_default();
        let mut failures: Vec<String> = Vec::new();

        let Some(mut provider) = self.registry.select_provider(priority, &tried) else {
            if !self.registry.has_available() {
                return Err(Error::NoProviderAvailable);
            }
            let mut skipped: Vec<String> = tried.into_iter().collect();
            skipped.sort();
            return Err(Error::AllProvidersFailed {
                attempts: skipped
                    .into_iter()
                    .map(|name| format!("{}: failed earlier in this request", name))
                    .collect(),
            });
        };

        let mut state = Trying::START;

        loop {
            let name = provider.name().to_string();
            debug!(provider = %name, attempt = state.attempt + 1, "Calling provider");

            let result = self.attempt(provider.as_ref(), prompt, options).await;
            let transition = self.policy.transition(state, result.as_ref().map(|_| ()));

            let error = match result {
                Ok(completion) => {
                    if failures.is_empty() {
                        debug!(provider = %name, "Provider succeeded");
                    } else {
                        info!(provider = %name, failed_attempts = failures.len(), "Provider succeeded after failover");
                    }
                    return Ok(GenerationResponse {
                        completion,
                        provider: name,
                        attempts: failures.len() + 1,
                    });
                }
                Err(error) => error,
            };

            warn!(provider = %name, attempt = state.attempt + 1, error = %error, "Provider attempt failed");
            failures.push(format!("{}#{}: {}", name, state.attempt + 1, error));

            match transition {
                Transition::NextAttempt { delay } => {
                    debug!(provider = %name, delay_ms = delay.as_millis() as u64, "Backing off");
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    state = state.next_attempt();
                }
                Transition::NextProvider => {
                    if error.should_failover() {
                        if let Some(scope) = scope {
                            scope.mark_bad(&name);
                        }
                    }
                    tried.insert(name);
                    match self.registry.select_provider(priority, &tried) {
                        Some(next) => {
                            provider = next;
                            state = state.next_provider();
                        }
                        None => return Err(Error::AllProvidersFailed { attempts: failures }),
                    }
                }
                Transition::Exhausted | Transition::Success => {
                    return Err(Error::AllProvidersFailed { attempts: failures });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::num::NonZeroU32;

    /// Provider that replays a script of outcomes
    struct ScriptedProvider {
        name: &'static str,
        script: Mutex<VecDeque<Result<Completion>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedProvider {
        fn new(name: &'static str, script: Vec<Result<Completion>>) -> Arc<Self> {
            Arc::new(Self {
                name,
                script: Mutex::new(script.into()),
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> u32 {
            *self.calls.lock()
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn is_available(&self) -> bool {
            true
        }

        async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Result<Completion> {
            *self.calls.lock() += 1;
            self.script
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(Error::transient(self.name, "script exhausted")))
        }
    }

    fn client(providers: Vec<Arc<ScriptedProvider>>) -> AIClient {
        let mut registry = ProviderRegistry::new();
        for provider in providers {
            registry.register(provider);
        }
        AIClient::new(Arc::new(registry), RetryConfig::immediate())
    }

    fn ok(text: &str) -> Result<Completion> {
        Ok(Completion::text(text))
    }

    #[tokio::test]
    async fn test_first_provider_succeeds() {
        let openai = ScriptedProvider::new("openai", vec![ok("Stride Lab")]);
        let client = client(vec![openai.clone()]);
        let response = client
            .generate("name", &GenerationOptions::default(), None)
            .await
            .unwrap();
        assert_eq!(response.provider, "openai");
        assert_eq!(response.attempts, 1);
        assert_eq!(response.completion.content, "Stride Lab");
    }

    #[tokio::test]
    async fn test_transient_error_is_retried_on_same_provider() {
        let openai = ScriptedProvider::new(
            "openai",
            vec![Err(Error::transient("openai", "HTTP 502")), ok("second try")],
        );
        let anthropic = ScriptedProvider::new("anthropic", vec![ok("unused")]);
        let client = client(vec![openai.clone(), anthropic.clone()]);

        let response = client
            .generate("tagline", &GenerationOptions::default(), None)
            .await
            .unwrap();
        assert_eq!(response.provider, "openai");
        assert_eq!(response.attempts, 2);
        assert_eq!(anthropic.calls(), 0);
    }

    #[tokio::test]
    async fn test_rate_limit_fails_over_without_retry() {
        let openai = ScriptedProvider::new("openai", vec![Err(Error::rate_limited("openai", Some(10)))]);
        let groq = ScriptedProvider::new("groq", vec![ok("from groq")]);
        let client = client(vec![openai.clone(), groq]);
        let scope = FailoverScope::new();

        let response = client
            .generate("tagline", &GenerationOptions::default(), Some(&scope))
            .await
            .unwrap();
        assert_eq!(response.provider, "groq");
        assert_eq!(openai.calls(), 1);
        assert!(scope.is_bad("openai"));
    }

    #[tokio::test]
    async fn test_all_providers_fail() {
        let unauthorized = |name: &'static str| {
            ScriptedProvider::new(name, vec![Err(Error::unauthorized(name, "bad key"))])
        };
        let a = unauthorized("a");
        let b = unauthorized("b");
        let c = unauthorized("c");
        let d = unauthorized("d");
        let client = client(vec![a, b, c, d.clone()]);

        let err = client
            .generate("x", &GenerationOptions::default(), None)
            .await
            .unwrap_err();
        match err {
            Error::AllProvidersFailed { attempts } => assert_eq!(attempts.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
        // capped at three distinct providers
        assert_eq!(d.calls(), 0);
    }

    #[tokio::test]
    async fn test_transient_exhaustion_across_providers() {
        let failing = |name: &'static str| {
            ScriptedProvider::new(
                name,
                vec![
                    Err(Error::EmptyResponse {
                        provider: name.to_string(),
                    }),
                    Err(Error::transient(name, "HTTP 500")),
                ],
            )
        };
        let a = failing("a");
        let b = failing("b");
        let client = client(vec![a.clone(), b.clone()]);

        let err = client
            .generate("x", &GenerationOptions::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AllProvidersFailed { ref attempts } if attempts.len() == 4));
        assert_eq!(a.calls(), 2);
        assert_eq!(b.calls(), 2);
    }

    #[tokio::test]
    async fn test_no_provider_available() {
        let client = AIClient::new(Arc::new(ProviderRegistry::new()), RetryConfig::immediate());
        let err = client
            .generate("x", &GenerationOptions::default(), None)
            .await
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_scope_skips_known_bad_provider() {
        let openai = ScriptedProvider::new("openai", vec![ok("unused")]);
        let groq = ScriptedProvider::new("groq", vec![ok("groq")]);
        let client = client(vec![openai.clone(), groq]);
        let scope = FailoverScope::new();
        scope.mark_bad("openai");

        let response = client
            .generate("x", &GenerationOptions::default(), Some(&scope))
            .await
            .unwrap();
        assert_eq!(response.provider, "groq");
        assert_eq!(openai.calls(), 0);
    }

    #[tokio::test]
    async fn test_local_rate_limit() {
        let openai = ScriptedProvider::new("openai", vec![ok("one"), ok("two")]);
        let mut registry = ProviderRegistry::new();
        registry.register_with_limit(openai.clone(), NonZeroU32::new(1));
        let client = AIClient::new(Arc::new(registry), RetryConfig::immediate());

        assert!(client.call("openai", "x", &GenerationOptions::default()).await.is_ok());
        let err = client
            .call("openai", "x", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProviderRateLimited { .. }));
        assert_eq!(openai.calls(), 1);
    }

    #[tokio::test]
    async fn test_call_unknown_provider() {
        let client = client(vec![]);
        let err = client
            .call("missing", "x", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
