//! Retry limits and exponential backoff
//!
//! The delay before retry `n` (0-indexed) is `min(base * 2^n, max)`. There is
//! no jitter: retry timing is part of the observable behaviour and stays
//! reproducible.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry and failover limits for one content-generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Distinct providers tried per call
    #[serde(default = "default_max_providers")]
    pub max_providers: usize,
    /// Attempts per provider, counting the first
    #[serde(default = "default_attempts_per_provider")]
    pub attempts_per_provider: u32,
    /// Backoff base in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Backoff cap in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_providers() -> usize {
    3
}

fn default_attempts_per_provider() -> u32 {
    2
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    16_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_providers: default_max_providers(),
            attempts_per_provider: default_attempts_per_provider(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl RetryConfig {
    /// Config with no backoff sleep, for tests and offline runs
    pub fn immediate() -> Self {
        Self {
            base_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Backoff before retry `attempt`
    pub fn delay(&self, attempt: u32) -> Duration {
        compute_delay(self.base_delay_ms, self.max_delay_ms, attempt)
    }
}

/// `min(base_ms * 2^attempt, max_ms)`, saturating
pub fn compute_delay(base_ms: u64, max_ms: u64, attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt);
    Duration::from_millis(base_ms.saturating_mul(factor).min(max_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays() {
        let config = RetryConfig::default();
        assert_eq!(config.delay(0), Duration::from_millis(1000));
        assert_eq!(config.delay(1), Duration::from_millis(2000));
        assert_eq!(config.delay(3), Duration::from_millis(8000));
        assert_eq!(config.delay(4), Duration::from_millis(16_000));
        assert_eq!(config.delay(10), Duration::from_millis(16_000));
    }

    #[test]
    fn test_delay_is_monotonic_and_capped() {
        let config = RetryConfig::default();
        let mut previous = Duration::ZERO;
        for attempt in 0..70 {
            let delay = config.delay(attempt);
            assert!(delay >= previous);
            assert!(delay <= Duration::from_millis(16_000));
            previous = delay;
        }
    }

    #[test]
    fn test_immediate_config_never_sleeps() {
        let config = RetryConfig::immediate();
        assert_eq!(config.delay(5), Duration::ZERO);
        assert_eq!(config.max_providers, 3);
        assert_eq!(config.attempts_per_provider, 2);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: RetryConfig = serde_yaml::from_str("max_providers: 5").unwrap();
        assert_eq!(config.max_providers, 5);
        assert_eq!(config.max_delay_ms, 16_000);
    }
}
