//! Configuration management for SITESMITH
//!
//! Provider keys live in [`crate::ai::AIConfig`]; this file holds everything
//! else a generation run can be tuned with.

use crate::ai::DetectorConfig;
use crate::content::DEFAULT_CONCURRENCY;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Generation configuration
    pub generation: GenerationConfig,
    /// Generic-content detection
    pub detector: DetectorConfig,
}

impl Config {
    /// Load configuration from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid YAML config: {}", e))),
            Some("toml") => toml::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid TOML config: {}", e))),
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| Error::config(format!("Invalid JSON config: {}", e))),
            _ => Err(Error::config("Unsupported config file format")),
        }
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::to_string(self)
                .map_err(|e| Error::config(format!("Failed to serialize to YAML: {}", e)))?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize to TOML: {}", e)))?,
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| Error::config(format!("Failed to serialize to JSON: {}", e)))?,
            _ => return Err(Error::config("Unsupported config file format")),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| Error::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.generation.concurrency == 0 {
            return Err(Error::config("Slot concurrency must be greater than 0"));
        }

        if self.generation.timeout_secs == 0 {
            return Err(Error::config("Timeout must be greater than 0"));
        }

        if self.detector.min_name_length == 0 || self.detector.max_name_words == 0 {
            return Err(Error::config(
                "Business name length limits must be greater than 0",
            ));
        }

        if self.generation.seed.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(Error::config("Seed override must not be blank"));
        }

        Ok(())
    }
}

/// Global configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Verbosity level used when no `-v` flag is given (0-3)
    pub verbosity: u8,
    /// Enable colored output
    pub color: bool,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            color: true,
            log_json: false,
        }
    }
}

/// Generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Content slots requested at once
    pub concurrency: usize,
    /// Upper bound for one whole generation (seconds)
    pub timeout_secs: u64,
    /// Design seed used instead of the prompt
    pub seed: Option<String>,
    /// Where generated projects are written
    pub output_dir: PathBuf,
    /// Never call a provider
    pub offline: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: 300,
            seed: None,
            output_dir: PathBuf::from("generated-site"),
            offline: false,
        }
    }
}
