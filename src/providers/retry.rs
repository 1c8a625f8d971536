// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bounded retry with exponential backoff for provider calls
//!
//! Only transient errors are retried (rate limits, timeouts, 5xx).
//! Backoff doubles from a 500ms base with random jitter; a provider
//! that supplies a retry-after hint overrides the computed delay.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use super::error::ProviderError;

const BASE_DELAY_MS: u64 = 500;
const MAX_DELAY_MS: u64 = 30_000;

/// Run a provider call with bounded retries on transient failures
///
/// # Arguments
/// * `provider` - Provider name for logging and the exhaustion error
/// * `max_retries` - Retries after the first attempt (0 = single try)
/// * `op` - The call to run; invoked fresh on each attempt
///
/// # Returns
/// The first success, the first non-retryable error, or
/// `ProviderError::Unavailable` once retries are exhausted.
pub async fn with_retry<T, F, Fut>(
    provider: &str,
    max_retries: u32,
    mut op: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt: u32 = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) => {
                attempt += 1;
                if attempt > max_retries {
                    warn!(
                        provider,
                        attempts = attempt,
                        code = err.error_code(),
                        "Provider retries exhausted"
                    );
                    return Err(ProviderError::Unavailable {
                        provider: provider.to_string(),
                        attempts: attempt,
                    });
                }

                let delay_ms = backoff_delay_ms(attempt, &err);
                warn!(
                    provider,
                    attempt,
                    delay_ms,
                    code = err.error_code(),
                    "Transient provider error, backing off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// Compute the backoff delay for the given attempt
fn backoff_delay_ms(attempt: u32, err: &ProviderError) -> u64 {
    // Provider-supplied hint wins over computed backoff
    if let ProviderError::RateLimited { retry_after_secs } = err {
        return retry_after_secs.saturating_mul(1000).min(MAX_DELAY_MS);
    }

    let exp = BASE_DELAY_MS.saturating_mul(1u64 << (attempt - 1).min(6));
    let capped = exp.min(MAX_DELAY_MS);
    let jitter = rand::thread_rng().gen_range(0..=capped / 2);
    (capped + jitter).min(MAX_DELAY_MS)
}
