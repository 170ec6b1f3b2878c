// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Retry and polling policy.
//!
//! Idempotent calls are retried on `UNAVAILABLE` and `DEADLINE_EXCEEDED`
//! with capped exponential backoff until the attempt limit or the total
//! timeout runs out. Long-running jobs are polled with [`PollSettings`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::Result;

/// Backoff settings for retrying idempotent RPCs.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrySettings {
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Factor applied to the delay after each retry.
    pub multiplier: f64,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
    /// Give up once this much time has passed since the first attempt.
    pub total_timeout: Duration,
    /// Maximum number of attempts including the first (0 = bounded by
    /// `total_timeout` only).
    pub max_attempts: u32,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            multiplier: 1.3,
            max_delay: Duration::from_secs(32),
            total_timeout: Duration::from_secs(600),
            max_attempts: 0,
        }
    }
}

impl RetrySettings {
    /// Settings that make exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Calculate the delay before the given retry (1-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        backoff(
            self.initial_delay,
            self.multiplier,
            self.max_delay,
            attempt,
        )
    }
}

/// Backoff settings for polling long-running operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSettings {
    pub initial_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
    /// Stop waiting after this long.
    pub total_timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            multiplier: 1.3,
            max_delay: Duration::from_secs(45),
            total_timeout: Duration::from_secs(3600),
        }
    }
}

impl PollSettings {
    /// Calculate the delay before the given poll (1-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        backoff(
            self.initial_delay,
            self.multiplier,
            self.max_delay,
            attempt,
        )
    }
}

fn backoff(initial: Duration, multiplier: f64, max: Duration, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
    let factor = multiplier.max(1.0).powi(exponent);
    let millis = initial.as_millis() as f64 * factor;
    if !millis.is_finite() || millis >= max.as_millis() as f64 {
        max
    } else {
        Duration::from_millis(millis as u64)
    }
}

/// Run `call` until it succeeds, fails with a non-retryable error, or the
/// settings are exhausted. The last error is returned in the latter case.
pub async fn retry<T, F, Fut>(settings: &RetrySettings, method: &str, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let started = Instant::now();
    let mut attempt = 0u32;

    loop {
        let err = match call().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() => err,
            Err(err) => return Err(err),
        };

        attempt += 1;
        if settings.max_attempts > 0 && attempt >= settings.max_attempts {
            debug!(method, attempt, "retry attempts exhausted");
            return Err(err);
        }

        let delay = settings.delay_for_attempt(attempt);
        if started.elapsed() + delay > settings.total_timeout {
            debug!(method, attempt, "retry timeout exhausted");
            return Err(err);
        }

        warn!(
            method,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "retrying spanner call"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::error::SdkError;

    #[test]
    fn test_retry_settings_default() {
        let settings = RetrySettings::default();
        assert_eq!(settings.initial_delay, Duration::from_secs(1));
        assert_eq!(settings.max_delay, Duration::from_secs(32));
        assert_eq!(settings.total_timeout, Duration::from_secs(600));
        assert_eq!(settings.max_attempts, 0);
    }

    #[test]
    fn test_delay_calculation() {
        let settings = RetrySettings::default();
        assert_eq!(settings.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(settings.delay_for_attempt(2), Duration::from_millis(1300));
        assert_eq!(settings.delay_for_attempt(3), Duration::from_millis(1690));
        // capped
        assert_eq!(settings.delay_for_attempt(40), Duration::from_secs(32));
        assert_eq!(settings.delay_for_attempt(u32::MAX), Duration::from_secs(32));
    }

    #[test]
    fn test_poll_delay_cap() {
        let settings = PollSettings::default();
        assert_eq!(settings.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(settings.delay_for_attempt(100), Duration::from_secs(45));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = retry(&RetrySettings::default(), "GetInstance", || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(SdkError::Unavailable("try again".into()))
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_fails_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<()> = retry(&RetrySettings::default(), "GetInstance", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(SdkError::NotFound("gone".into()))
            }
        })
        .await;

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let settings = RetrySettings {
            max_attempts: 3,
            ..RetrySettings::default()
        };

        let result: Result<()> = retry(&settings, "ListInstances", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(SdkError::DeadlineExceeded("slow".into()))
            }
        })
        .await;

        assert!(matches!(result, Err(SdkError::DeadlineExceeded(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_total_timeout() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let settings = RetrySettings {
            total_timeout: Duration::from_millis(2500),
            ..RetrySettings::default()
        };

        let result: Result<()> = retry(&settings, "ListInstances", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(SdkError::Unavailable("down".into()))
            }
        })
        .await;

        // 1000ms + 1300ms fit, the third delay of 1690ms does not
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
