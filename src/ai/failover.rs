//! Retry-then-failover state machine
//!
//! One content call moves through `Trying { provider, attempt }` states:
//!
//! ```text
//! Trying(p, a) --ok--------------------------------> Success
//! Trying(p, a) --retryable, a+1 < attempts---------> NextAttempt (backoff) -> Trying(p, a+1)
//! Trying(p, a) --other failure, p+1 < providers----> NextProvider          -> Trying(p+1, 0)
//! Trying(p, a) --otherwise-------------------------> Exhausted
//! ```
//!
//! `provider` counts distinct providers tried, not catalog positions; the
//! client decides which provider is next.

use super::retry::RetryConfig;
use crate::error::Error;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::time::Duration;

/// The live state of a failover sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trying {
    /// Distinct providers tried before this one
    pub provider: usize,
    /// Attempts already made on this provider
    pub attempt: u32,
}

impl Trying {
    /// First attempt on the first provider
    pub const START: Trying = Trying {
        provider: 0,
        attempt: 0,
    };

    /// Same provider, next attempt
    pub fn next_attempt(self) -> Self {
        Self {
            attempt: self.attempt + 1,
            ..self
        }
    }

    /// Next provider, first attempt
    pub fn next_provider(self) -> Self {
        Self {
            provider: self.provider + 1,
            attempt: 0,
        }
    }
}

/// What to do after an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The attempt succeeded
    Success,
    /// Retry the same provider after `delay`
    NextAttempt {
        /// Backoff before the retry
        delay: Duration,
    },
    /// Move to a different provider immediately
    NextProvider,
    /// Give up
    Exhausted,
}

/// Transition rules derived from [`RetryConfig`]
#[derive(Debug, Clone, Default)]
pub struct FailoverPolicy {
    retry: RetryConfig,
}

impl FailoverPolicy {
    /// Policy with the given limits
    pub fn new(retry: RetryConfig) -> Self {
        Self { retry }
    }

    /// Limits in use
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Decide the next step after an attempt
    pub fn transition(&self, state: Trying, outcome: Result<(), &Error>) -> Transition {
        let error = match outcome {
            Ok(()) => return Transition::Success,
            Err(error) => error,
        };

        if error.is_retryable() && state.attempt + 1 < self.retry.attempts_per_provider {
            Transition::NextAttempt {
                delay: self.retry.delay(state.attempt),
            }
        } else if state.provider + 1 < self.retry.max_providers {
            Transition::NextProvider
        } else {
            Transition::Exhausted
        }
    }
}

/// Providers known to be unusable for the rest of one generation request
///
/// Shared by the slots of a single request only; a new request starts with
/// an empty scope.
#[derive(Debug, Default)]
pub struct FailoverScope {
    known_bad: Mutex<HashSet<String>>,
}

impl FailoverScope {
    /// Empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a provider as unusable
    pub fn mark_bad(&self, provider: &str) {
        self.known_bad.lock().insert(provider.to_string());
    }

    /// Whether a provider was recorded as unusable
    pub fn is_bad(&self, provider: &str) -> bool {
        self.known_bad.lock().contains(provider)
    }

    /// Copy of the known-bad set
    pub fn snapshot(&self) -> HashSet<String> {
        self.known_bad.lock().clone()
    }
}
