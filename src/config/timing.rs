//! Timing configuration: store retry policy and the presentation delay
//! before played cards are cleared from the shared table document.

use std::env;
use std::time::Duration;

use crate::errors::domain::{DomainError, ValidationKind};

const DEFAULT_CLEAR_DELAY_MS: u64 = 1500;
const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 50;
const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 1000;

/// Retry policy for transient document store failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_RETRY_MAX_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingConfig {
    /// How long resolved cards stay visible before the presentation timer
    /// clears them. Display-only: correctness never depends on it.
    pub clear_delay: Duration,
    pub retry: RetryConfig,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            clear_delay: Duration::from_millis(DEFAULT_CLEAR_DELAY_MS),
            retry: RetryConfig::default(),
        }
    }
}

impl TimingConfig {
    /// Build from environment variables, falling back to defaults:
    /// `WARTABLE_CLEAR_DELAY_MS`, `WARTABLE_RETRY_MAX_ATTEMPTS`,
    /// `WARTABLE_RETRY_BASE_DELAY_MS`.
    pub fn from_env() -> Result<Self, DomainError> {
        let clear_delay =
            Duration::from_millis(env_parsed("WARTABLE_CLEAR_DELAY_MS", DEFAULT_CLEAR_DELAY_MS)?);
        let max_attempts = env_parsed("WARTABLE_RETRY_MAX_ATTEMPTS", DEFAULT_RETRY_MAX_ATTEMPTS)?;
        if max_attempts == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "WARTABLE_RETRY_MAX_ATTEMPTS must be at least 1",
            ));
        }
        let base_delay = Duration::from_millis(env_parsed(
            "WARTABLE_RETRY_BASE_DELAY_MS",
            DEFAULT_RETRY_BASE_DELAY_MS,
        )?);
        Ok(Self {
            clear_delay,
            retry: RetryConfig {
                max_attempts,
                base_delay,
                max_delay: Duration::from_millis(DEFAULT_RETRY_MAX_DELAY_MS),
            },
        })
    }
}

fn env_parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, DomainError> {
    match env::var(name) {
        Ok(raw) => raw.parse::<T>().map_err(|_| {
            DomainError::validation(
                ValidationKind::InvalidConfig,
                format!("{name} must be a non-negative integer, got '{raw}'"),
            )
        }),
        Err(_) => Ok(default),
    }
}
