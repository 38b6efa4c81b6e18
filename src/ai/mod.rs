//! Multi-provider AI content generation
//!
//! # Architecture
//!
//! - [`AIConfig`]: provider keys, priority, retry and rate-limit settings
//! - [`ProviderRegistry`]: configured providers keyed by name
//! - [`AIClient`]: retry-then-failover across the registry
//! - [`PromptBuilder`]: per-slot prompts
//! - [`ResponseParser`]: raw completion to slot value
//! - [`ContentValidator`]: generic-content detection
//!
//! # Example
//!
//! ```no_run
//! use sitesmith::ai::{AIClient, AIConfig, GenerationOptions};
//!
//! async fn tagline() -> anyhow::Result<()> {
//!     let config = AIConfig::load()?;
//!     let client = AIClient::from_config(&config)?;
//!
//!     let response = client
//!         .generate("Write a tagline for a bakery", &GenerationOptions::default(), None)
//!         .await?;
//!
//!     println!("{} said: {}", response.provider, response.completion.content);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod failover;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod registry;
pub mod retry;
pub mod validator;

pub use client::{AIClient, GenerationResponse};
pub use config::{AIConfig, AuthMode, ProviderConfig, ProviderKind};
pub use failover::{FailoverPolicy, FailoverScope};
pub use parser::ResponseParser;
pub use prompt::{PromptBuilder, PromptContext};
pub use providers::{Completion, GenerationOptions, HttpProvider, LLMProvider, Usage};
pub use registry::ProviderRegistry;
pub use retry::RetryConfig;
pub use validator::{ContentValidator, DetectorConfig};
