//! Retry with backoff for transient document store failures.

use std::future::Future;
use std::time::Duration;

use rand::random;
use tokio::time::sleep;
use tracing::warn;

use crate::config::RetryConfig;
use crate::errors::domain::{DomainError, InfraErrorKind};

const JITTER_PERCENT: f64 = 0.2;

/// Whether an error is worth retrying. Validation, conflict, and
/// not-found outcomes are deterministic; only operational store failures
/// qualify, and corrupted data never heals on its own.
pub fn is_transient(err: &DomainError) -> bool {
    match err {
        DomainError::Infra(kind, _) => !matches!(kind, InfraErrorKind::DataCorruption),
        _ => false,
    }
}

fn backoff_delay(cfg: &RetryConfig, attempt: u32) -> Duration {
    let base = cfg.base_delay.as_millis() as f64 * 2_f64.powi(attempt.saturating_sub(1) as i32);
    let capped = base.min(cfg.max_delay.as_millis() as f64);
    let jitter = (random::<f64>() * 2.0 - 1.0) * capped * JITTER_PERCENT;
    Duration::from_millis((capped + jitter).max(1.0) as u64)
}

/// Run `op`, retrying transient failures up to `cfg.max_attempts` total
/// attempts with exponential backoff and jitter.
pub async fn with_retry<T, F, Fut>(
    op_name: &'static str,
    cfg: &RetryConfig,
    mut op: F,
) -> Result<T, DomainError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < cfg.max_attempts && is_transient(&err) => {
                let delay = backoff_delay(cfg, attempt);
                warn!(
                    error = %err,
                    attempt,
                    retry_delay_ms = delay.as_millis() as u64,
                    "{op_name} failed, retrying"
                );
                sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
