//! Provider registry
//!
//! Read-only catalog of callable providers, built once from [`AIConfig`] and
//! shared by every generation request. Selection walks the priority list and
//! then the rest of the catalog, skipping providers without usable keys.

use super::config::AIConfig;
use super::providers::{HttpProvider, LLMProvider};
use crate::error::Result;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

/// A registered provider and its client-side request budget
#[derive(Clone)]
pub struct RegisteredProvider {
    /// Provider implementation
    pub provider: Arc<dyn LLMProvider>,
    /// Requests allowed per minute, `None` for unlimited
    pub rate_limit_per_minute: Option<NonZeroU32>,
}

impl fmt::Debug for RegisteredProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredProvider")
            .field("name", &self.provider.name())
            .field("available", &self.provider.is_available())
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}

/// Catalog of providers in priority order
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, RegisteredProvider>,
    priority: Vec<String>,
}

impl ProviderRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build HTTP providers for every enabled catalog entry
    pub fn from_config(config: &AIConfig) -> Result<Self> {
        let mut registry = Self::new();

        for name in config.providers_in_priority() {
            let Some(provider_config) = config.get_provider(&name) else {
                continue;
            };
            if !provider_config.enabled {
                debug!("Provider '{}' is disabled", name);
                continue;
            }
            let rate_limit = NonZeroU32::new(provider_config.rate_limit_per_minute);
            let provider = HttpProvider::new(name.clone(), provider_config.clone())?;
            registry.register_with_limit(Arc::new(provider), rate_limit);
        }

        debug!(
            registered = registry.len(),
            available = registry.available_names().len(),
            "Provider registry ready"
        );
        Ok(registry)
    }

    /// Add a provider at the end of the priority order, without a rate limit
    pub fn register(&mut self, provider: Arc<dyn LLMProvider>) {
        self.register_with_limit(provider, None);
    }

    /// Add a provider at the end of the priority order
    pub fn register_with_limit(
        &mut self,
        provider: Arc<dyn LLMProvider>,
        rate_limit_per_minute: Option<NonZeroU32>,
    ) {
        let name = provider.name().to_string();
        if !self.priority.contains(&name) {
            self.priority.push(name.clone());
        }
        self.providers.insert(
            name,
            RegisteredProvider {
                provider,
                rate_limit_per_minute,
            },
        );
    }

    /// Builder form of [`ProviderRegistry::register`]
    pub fn with_provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Replace the priority order; unknown names are kept and skipped at
    /// selection time
    pub fn set_priority(&mut self, priority: Vec<String>) {
        self.priority = priority;
    }

    /// Priority order
    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    /// Look up a provider by name
    pub fn get(&self, name: &str) -> Option<&RegisteredProvider> {
        self.providers.get(name)
    }

    /// Registered providers by name
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RegisteredProvider)> {
        self.providers.iter()
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Names of providers that could be called, in selection order
    pub fn available_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut excluded = HashSet::new();
        while let Some(provider) = self.select_provider(&self.priority, &excluded) {
            let name = provider.name().to_string();
            excluded.insert(name.clone());
            names.push(name);
        }
        names
    }

    /// Whether any provider could be called
    pub fn has_available(&self) -> bool {
        self.select_provider(&self.priority, &HashSet::new()).is_some()
    }

    /// First available provider in `priority` not in `excluding`, else the
    /// first available of the remaining catalog (by name), else `None`
    pub fn select_provider(
        &self,
        priority: &[String],
        excluding: &HashSet<String>,
    ) -> Option<Arc<dyn LLMProvider>> {
        let usable = |name: &str| {
            !excluding.contains(name)
                && self
                    .providers
                    .get(name)
                    .map(|entry| entry.provider.is_available())
                    .unwrap_or(false)
        };

        priority
            .iter()
            .map(String::as_str)
            .find(|name| usable(*name))
            .or_else(|| self.providers.keys().map(String::as_str).find(|name| usable(*name)))
            .and_then(|name| self.providers.get(name))
            .map(|entry| Arc::clone(&entry.provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::providers::{Completion, GenerationOptions};
    use async_trait::async_trait;

    struct StubProvider {
        name: &'static str,
        available: bool,
    }

    #[async_trait]
    impl LLMProvider for StubProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Result<Completion> {
            Ok(Completion::text(self.name))
        }
    }

    fn registry(entries: &[(&'static str, bool)]) -> ProviderRegistry {
        let mut registry = ProviderRegistry::new();
        for (name, available) in entries {
            registry.register(Arc::new(StubProvider {
                name: *name,
                available: *available,
            }));
        }
        registry
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_skips_unavailable() {
        let registry = registry(&[("openai", false), ("anthropic", true), ("gemini", true)]);
        let selected = registry.select_provider(registry.priority(), &HashSet::new());
        assert_eq!(selected.map(|p| p.name().to_string()), Some("anthropic".to_string()));
    }

    #[test]
    fn test_select_respects_exclusions() {
        let registry = registry(&[("openai", true), ("anthropic", true)]);
        let excluded: HashSet<String> = ["openai".to_string()].into_iter().collect();
        let selected = registry.select_provider(registry.priority(), &excluded);
        assert_eq!(selected.map(|p| p.name().to_string()), Some("anthropic".to_string()));
    }

    #[test]
    fn test_select_falls_back_to_whole_catalog() {
        let registry = registry(&[("openai", false), ("cohere", true)]);
        // priority list only names the unavailable provider
        let selected = registry.select_provider(&names(&["openai"]), &HashSet::new());
        assert_eq!(selected.map(|p| p.name().to_string()), Some("cohere".to_string()));
    }

    #[test]
    fn test_select_none_when_nothing_usable() {
        let registry = registry(&[("openai", false), ("anthropic", false)]);
        assert!(registry.select_provider(registry.priority(), &HashSet::new()).is_none());
        assert!(!registry.has_available());
        assert!(ProviderRegistry::new().available_names().is_empty());
    }

    #[test]
    fn test_available_names_in_order() {
        let registry = registry(&[("groq", true), ("openai", false), ("deepseek", true)]);
        assert_eq!(registry.available_names(), names(&["groq", "deepseek"]));
    }

    #[test]
    fn test_from_default_config_without_keys() {
        let registry = ProviderRegistry::from_config(&AIConfig::default()).unwrap();
        // ollama is disabled by default, every hosted provider is registered
        assert_eq!(registry.len(), 7);
        assert!(!registry.has_available());
    }
}
