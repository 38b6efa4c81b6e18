//! AI provider configuration
//!
//! Loads, saves and validates the provider catalog. The file lives at
//! `~/.sitesmith/ai-config.yaml`; without it the built-in catalog is used and
//! API keys come from environment variables referenced as `${VAR}`.

use super::retry::RetryConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wire protocol family of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI chat completions and compatible APIs (Groq, DeepSeek)
    OpenaiCompat,
    /// Anthropic messages API
    Anthropic,
    /// Google Gemini `generateContent`
    Gemini,
    /// Cohere generate API
    Cohere,
    /// Hugging Face inference API
    Huggingface,
    /// Local Ollama server
    Ollama,
}

/// How the API key travels with a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `x-api-key: <key>`
    ApiKeyHeader,
    /// `?key=<key>` on the endpoint URL
    QueryParam,
    /// No credentials
    None,
}

/// Configuration of one upstream provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Protocol family
    pub kind: ProviderKind,
    /// Whether the provider may be selected at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Credential transport
    pub auth_mode: AuthMode,
    /// Full request URL
    pub endpoint: String,
    /// Model identifier
    pub model: String,
    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature (0.0-2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Client-side request budget per minute
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,
    /// API key, or a `${ENV_VAR}` reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_rate_limit() -> u32 {
    60
}

impl ProviderConfig {
    fn hosted(
        kind: ProviderKind,
        auth_mode: AuthMode,
        endpoint: &str,
        model: &str,
        env_var: &str,
        rate_limit_per_minute: u32,
    ) -> Self {
        Self {
            kind,
            enabled: true,
            auth_mode,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            rate_limit_per_minute,
            api_key: Some(format!("${{{}}}", env_var)),
        }
    }

    /// Whether the provider can be called: keyless providers always can,
    /// others need a real (non-placeholder) key
    pub fn has_usable_key(&self) -> bool {
        match self.auth_mode {
            AuthMode::None => true,
            _ => self
                .api_key
                .as_deref()
                .map(|key| !is_placeholder_key(key))
                .unwrap_or(false),
        }
    }

    /// Enabled and holding a usable key
    pub fn is_eligible(&self) -> bool {
        self.enabled && self.has_usable_key()
    }
}

/// Detect keys that were never filled in
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    if key.is_empty() || (key.starts_with("${") && key.ends_with('}')) {
        return true;
    }
    let lowered = key.to_ascii_lowercase();
    ["your_", "your-", "placeholder", "changeme", "xxx"]
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Main AI configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIConfig {
    /// Provider names in selection order
    #[serde(default)]
    pub priority: Vec<String>,
    /// Provider catalog keyed by name
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
    /// Retry and failover limits
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            priority: DEFAULT_PRIORITY.iter().map(|s| s.to_string()).collect(),
            providers: Self::default_providers(),
            retry: RetryConfig::default(),
        }
    }
}

const DEFAULT_PRIORITY: &[&str] = &[
    "openai",
    "anthropic",
    "gemini",
    "groq",
    "deepseek",
    "cohere",
    "huggingface",
    "ollama",
];

impl AIConfig {
    /// Built-in catalog with keys expanded from the process environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.expand_env_vars();
        config
    }

    /// Load from the default location, falling back to [`AIConfig::from_env`]
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            debug!("No AI config at {}, using built-in catalog", config_path.display());
            return Ok(Self::from_env());
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read AI config from {}", path.display()))?;

        let mut config: AIConfig =
            serde_yaml::from_str(&content).with_context(|| "Failed to parse AI configuration")?;

        config.expand_env_vars();
        config.validate()?;
        Ok(config)
    }

    /// Save to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content =
            serde_yaml::to_string(self).with_context(|| "Failed to serialize AI configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write AI config to {}", path.display()))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(home.join(".sitesmith").join("ai-config.yaml"))
    }

    /// Replace `${VAR}` key references with environment values
    pub fn expand_env_vars(&mut self) {
        self.expand_env_vars_with(|name| std::env::var(name).ok());
    }

    /// Replace `${VAR}` key references using a custom lookup
    pub fn expand_env_vars_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (name, provider) in self.providers.iter_mut() {
            let Some(template) = provider.api_key.as_deref() else {
                continue;
            };
            if !(template.starts_with("${") && template.ends_with('}')) {
                continue;
            }
            let env_var = &template[2..template.len() - 1];
            if let Some(value) = lookup(env_var).filter(|v| !v.trim().is_empty()) {
                debug!("Loaded API key for provider '{}' from {}", name, env_var);
                provider.api_key = Some(value);
            }
        }
    }

    /// Get provider configuration by name
    pub fn get_provider(&self, name: &str) -> Option<&ProviderConfig> {
        self.providers.get(name)
    }

    /// Names in priority order, then any remaining catalog entries by name
    pub fn providers_in_priority(&self) -> Vec<String> {
        let mut result: Vec<String> = self
            .priority
            .iter()
            .filter(|name| self.providers.contains_key(*name))
            .cloned()
            .collect();

        for name in self.providers.keys() {
            if !result.contains(name) {
                result.push(name.clone());
            }
        }

        result
    }

    /// Names of providers that could be called right now
    pub fn eligible_providers(&self) -> Vec<String> {
        self.providers_in_priority()
            .into_iter()
            .filter(|name| self.providers.get(name).map(|p| p.is_eligible()).unwrap_or(false))
            .collect()
    }

    /// Disable every provider not in `names`
    pub fn restrict_to(&mut self, names: &[String]) {
        for (name, provider) in self.providers.iter_mut() {
            if !names.contains(name) {
                provider.enabled = false;
            }
        }
        self.priority = names.to_vec();
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for name in &self.priority {
            if !self.providers.contains_key(name) {
                anyhow::bail!("Priority lists unknown provider '{}'", name);
            }
        }

        for (name, provider) in &self.providers {
            if provider.max_tokens == 0 || provider.max_tokens > 200_000 {
                anyhow::bail!(
                    "Provider '{}' has invalid max_tokens: {}. Must be between 1 and 200,000",
                    name,
                    provider.max_tokens
                );
            }

            if !(0.0..=2.0).contains(&provider.temperature) {
                anyhow::bail!(
                    "Provider '{}' has invalid temperature: {}. Must be between 0.0 and 2.0",
                    name,
                    provider.temperature
                );
            }

            if provider.timeout_secs == 0 || provider.timeout_secs > 600 {
                anyhow::bail!(
                    "Provider '{}' has invalid timeout: {}s. Must be between 1 and 600 seconds",
                    name,
                    provider.timeout_secs
                );
            }

            if provider.rate_limit_per_minute == 0 {
                anyhow::bail!("Provider '{}' must allow at least one request per minute", name);
            }

            url::Url::parse(&provider.endpoint)
                .with_context(|| format!("Provider '{}' has an invalid endpoint", name))?;
        }

        if self.retry.max_providers == 0 || self.retry.attempts_per_provider == 0 {
            anyhow::bail!("Retry limits must allow at least one provider and one attempt");
        }

        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            anyhow::bail!("Retry base delay must not exceed the maximum delay");
        }

        Ok(())
    }

    /// Built-in provider catalog
    fn default_providers() -> BTreeMap<String, ProviderConfig> {
        use AuthMode::{ApiKeyHeader, Bearer, QueryParam};
        use ProviderKind::*;

        let mut providers = BTreeMap::new();

        providers.insert(
            "openai".to_string(),
            ProviderConfig::hosted(
                OpenaiCompat,
                Bearer,
                "https://api.openai.com/v1/chat/completions",
                "gpt-4o-mini",
                "OPENAI_API_KEY",
                60,
            ),
        );
        providers.insert(
            "anthropic".to_string(),
            ProviderConfig::hosted(
                Anthropic,
                ApiKeyHeader,
                "https://api.anthropic.com/v1/messages",
                "claude-3-5-haiku-latest",
                "ANTHROPIC_API_KEY",
                50,
            ),
        );
        providers.insert(
            "gemini".to_string(),
            ProviderConfig::hosted(
                Gemini,
                QueryParam,
                "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent",
                "gemini-1.5-flash",
                "GEMINI_API_KEY",
                15,
            ),
        );
        providers.insert(
            "groq".to_string(),
            ProviderConfig::hosted(
                OpenaiCompat,
                Bearer,
                "https://api.groq.com/openai/v1/chat/completions",
                "llama-3.1-8b-instant",
                "GROQ_API_KEY",
                30,
            ),
        );
        providers.insert(
            "deepseek".to_string(),
            ProviderConfig::hosted(
                OpenaiCompat,
                Bearer,
                "https://api.deepseek.com/v1/chat/completions",
                "deepseek-chat",
                "DEEPSEEK_API_KEY",
                60,
            ),
        );
        providers.insert(
            "cohere".to_string(),
            ProviderConfig::hosted(
                Cohere,
                Bearer,
                "https://api.cohere.ai/v1/generate",
                "command",
                "COHERE_API_KEY",
                20,
            ),
        );
        providers.insert(
            "huggingface".to_string(),
            ProviderConfig::hosted(
                Huggingface,
                Bearer,
                "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2",
                "mistralai/Mistral-7B-Instruct-v0.2",
                "HUGGINGFACE_API_KEY",
                10,
            ),
        );
        providers.insert(
            "ollama".to_string(),
            ProviderConfig {
                kind: Ollama,
                enabled: false,
                auth_mode: AuthMode::None,
                endpoint: "http://localhost:11434/api/generate".to_string(),
                model: "llama3.1".to_string(),
                max_tokens: default_max_tokens(),
                temperature: default_temperature(),
                timeout_secs: 120,
                rate_limit_per_minute: 120,
                api_key: None,
            },
        );

        providers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AIConfig::default();
        assert_eq!(config.priority.first().map(String::as_str), Some("openai"));
        assert_eq!(config.providers.len(), 8);
        assert!(config.validate().is_ok());
        // nothing is usable until keys are expanded
        assert!(config.eligible_providers().is_empty());
    }

    #[test]
    fn test_serialization() {
        let config = AIConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("priority"));
        assert!(yaml.contains("${OPENAI_API_KEY}"));

        let deserialized: AIConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_placeholder_keys() {
        for key in ["", "   ", "${OPENAI_API_KEY}", "your_api_key", "sk-your-key", "PLACEHOLDER", "changeme", "sk-xxxx"] {
            assert!(is_placeholder_key(key), "{key:?}");
        }
        assert!(!is_placeholder_key("sk-live-4f9a8b7c"));
    }

    #[test]
    fn test_env_expansion() {
        let mut config = AIConfig::default();
        config.expand_env_vars_with(|name| match name {
            "ANTHROPIC_API_KEY" => Some("sk-ant-real".to_string()),
            "GROQ_API_KEY" => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(
            config.get_provider("anthropic").and_then(|p| p.api_key.as_deref()),
            Some("sk-ant-real")
        );
        assert_eq!(
            config.get_provider("groq").and_then(|p| p.api_key.as_deref()),
            Some("${GROQ_API_KEY}")
        );
        assert_eq!(config.eligible_providers(), vec!["anthropic".to_string()]);
    }

    #[test]
    fn test_providers_in_priority_appends_unlisted() {
        let mut config = AIConfig::default();
        config.priority = vec!["gemini".to_string(), "cohere".to_string()];
        let order = config.providers_in_priority();
        assert_eq!(&order[..2], &["gemini".to_string(), "cohere".to_string()]);
        assert_eq!(order.len(), 8);
        // remaining entries in name order
        assert_eq!(order[2], "anthropic");
    }

    #[test]
    fn test_keyless_provider_needs_enabling() {
        let mut config = AIConfig::default();
        assert!(!config.get_provider("ollama").unwrap().is_eligible());
        config.providers.get_mut("ollama").unwrap().enabled = true;
        assert_eq!(config.eligible_providers(), vec!["ollama".to_string()]);
    }

    #[test]
    fn test_validation() {
        let mut config = AIConfig::default();
        config.priority.push("missing".to_string());
        assert!(config.validate().is_err());

        let mut config = AIConfig::default();
        config.providers.get_mut("openai").unwrap().temperature = 3.0;
        assert!(config.validate().is_err());

        let mut config = AIConfig::default();
        config.providers.get_mut("openai").unwrap().endpoint = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_saved_default_catalog_keeps_key_references() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai-config.yaml");
        AIConfig::default().save_to(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("${OPENAI_API_KEY}"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ai-config.yaml");
        let mut config = AIConfig::default();
        config.restrict_to(&["gemini".to_string()]);
        config.save_to(&path).unwrap();

        let loaded = AIConfig::load_from(&path).unwrap();
        assert_eq!(loaded.priority, vec!["gemini".to_string()]);
        assert!(!loaded.get_provider("openai").unwrap().enabled);
    }
}
