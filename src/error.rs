//! Error types for SITESMITH
//!
//! Every failure the generation pipeline can observe is a variant of [`Error`].
//! Provider failures are classified so the client can decide between retrying,
//! failing over, or giving up; content failures are recovered at the slot level.

use std::io;
use thiserror::Error;

/// Result type alias for SITESMITH operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for SITESMITH
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// No provider in the catalog has a usable API key
    #[error("No AI provider available: configure at least one provider API key")]
    NoProviderAvailable,

    /// Provider rejected the credentials (HTTP 401/403 or invalid key payload)
    #[error("Provider {provider} rejected the API key: {message}")]
    ProviderUnauthorized {
        /// Provider name
        provider: String,
        /// Upstream message
        message: String,
    },

    /// Provider quota or rate limit hit
    #[error("Provider {provider} is rate limited{}", retry_hint(.retry_after_secs))]
    ProviderRateLimited {
        /// Provider name
        provider: String,
        /// Seconds suggested by the upstream `retry-after` header
        retry_after_secs: Option<u64>,
    },

    /// Provider refused the request for a reason other than auth or quota
    #[error("Provider {provider} rejected the request (HTTP {status}): {message}")]
    ProviderRejected {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Upstream message
        message: String,
    },

    /// Server error, network failure or timeout
    #[error("Provider {provider} failed transiently: {message}")]
    ProviderTransient {
        /// Provider name
        provider: String,
        /// Failure description
        message: String,
    },

    /// Provider answered with a blank completion
    #[error("Provider {provider} returned an empty response")]
    EmptyResponse {
        /// Provider name
        provider: String,
    },

    /// Every provider and attempt failed for one call
    #[error("All providers failed after {} attempts", .attempts.len())]
    AllProvidersFailed {
        /// One line per failed attempt, `provider#attempt: error`
        attempts: Vec<String>,
    },

    /// Generated content looked like unfilled template boilerplate
    #[error("Generic content detected in slot {slot}: {reason}")]
    GenericContent {
        /// Slot key
        slot: String,
        /// Detector finding
        reason: String,
    },

    /// Parsing errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Generation was cancelled by the caller
    #[error("Generation cancelled")]
    Cancelled,

    /// Template rendering failed
    #[error("Render error in {file}: {message}")]
    Render {
        /// Output file path
        file: String,
        /// Renderer message
        message: String,
    },

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        /// Error context
        context: String,
        /// Source error
        source: Box<Error>,
    },
}

fn retry_hint(retry_after_secs: &Option<u64>) -> String {
    match retry_after_secs {
        Some(secs) => format!(" (retry after {}s)", secs),
        None => String::new(),
    }
}

impl From<tera::Error> for Error {
    fn from(err: tera::Error) -> Self {
        Error::Render {
            file: "<template>".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(format!("Invalid TOML: {}", err))
    }
}

impl Error {
    /// Add context to an error
    pub fn context<S: Into<String>>(self, context: S) -> Self {
        Error::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Create a transient provider error
    pub fn transient<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Error::ProviderTransient {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an unauthorized provider error
    pub fn unauthorized<P: Into<String>, M: Into<String>>(provider: P, message: M) -> Self {
        Error::ProviderUnauthorized {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a rate limited provider error
    pub fn rate_limited<P: Into<String>>(provider: P, retry_after_secs: Option<u64>) -> Self {
        Error::ProviderRateLimited {
            provider: provider.into(),
            retry_after_secs,
        }
    }

    /// Strip any [`Error::WithContext`] layers
    pub fn root(&self) -> &Error {
        match self {
            Error::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Check if error is fatal for a whole generation request
    pub fn is_fatal(&self) -> bool {
        matches!(self.root(), Error::NoProviderAvailable)
    }

    /// Check if the same provider may be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.root(),
            Error::ProviderTransient { .. } | Error::EmptyResponse { .. } | Error::HttpRequest(_)
        )
    }

    /// Check if the client should move to the next provider without retrying
    pub fn should_failover(&self) -> bool {
        matches!(
            self.root(),
            Error::ProviderUnauthorized { .. }
                | Error::ProviderRateLimited { .. }
                | Error::ProviderRejected { .. }
        )
    }
}

/// Trait for adding context to results
pub trait ResultExt<T> {
    /// Add context to the error
    fn context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (only called on error)
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T> ResultExt<T> for Result<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| e.context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err = Error::Parse("invalid syntax".to_string());
        let err_with_context = err.context("parsing services slot");
        assert!(matches!(err_with_context, Error::WithContext { .. }));
    }

    #[test]
    fn test_error_is_retryable() {
        assert!(Error::transient("openai", "HTTP 502").is_retryable());
        assert!(Error::EmptyResponse {
            provider: "groq".to_string()
        }
        .is_retryable());
        assert!(!Error::rate_limited("openai", None).is_retryable());
        assert!(!Error::unauthorized("openai", "bad key").is_retryable());
    }

    #[test]
    fn test_error_should_failover() {
        assert!(Error::rate_limited("openai", Some(30)).should_failover());
        assert!(Error::unauthorized("anthropic", "invalid x-api-key").should_failover());
        assert!(!Error::transient("openai", "timeout").should_failover());
    }

    #[test]
    fn test_context_preserves_classification() {
        let err = Error::transient("gemini", "HTTP 503").context("calling tagline slot");
        assert!(err.is_retryable());
        assert!(Error::NoProviderAvailable.context("generation").is_fatal());
    }

    #[test]
    fn test_rate_limited_display() {
        let err = Error::rate_limited("openai", Some(20));
        assert_eq!(
            err.to_string(),
            "Provider openai is rate limited (retry after 20s)"
        );
        let err = Error::rate_limited("openai", None);
        assert_eq!(err.to_string(), "Provider openai is rate limited");
    }
}
