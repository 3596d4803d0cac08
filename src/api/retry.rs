//
//  toloka-client
//  api/retry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Retry Policy
//!
//! Wraps a single-attempt request executor with bounded retries.
//!
//! An attempt is retried when it:
//!
//! - fails with a transient error (`Timeout`, `Network`, `MalformedResponse`),
//! - yields a `null` body, or
//! - is rate limited (HTTP 429 or `code == "TOO_MANY_REQUESTS"`).
//!
//! Before attempt `i + 1` (counting from zero) the policy sleeps
//! `unit * (i^2 + 1)`; with the default one second unit that is 1s, 2s, 5s,
//! 10s, ... No delay follows the last attempt. When every attempt is spent the
//! call fails with [`ApiError::ExhaustedRetries`].
//!
//! Any other error (e.g. an invalid URL) is returned at once.

use std::future::Future;
use std::time::Duration;

use super::common::ApiError;
use super::transport::{ApiRequest, RawResponse, RequestExecutor};

/// Retry policy applied to every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_BACKOFF_UNIT)
    }
}

impl RetryPolicy {
    /// Attempts per request, including the first.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 15;

    /// Unit the quadratic backoff is scaled by.
    pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(1);

    /// Creates a policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_unit,
        }
    }

    /// A policy that never sleeps between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Attempts made before giving up, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Unit the quadratic backoff is scaled by.
    pub fn backoff_unit(&self) -> Duration {
        self.backoff_unit
    }

    /// Delay slept after the failed attempt `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = attempt.saturating_mul(attempt).saturating_add(1);
        self.backoff_unit.saturating_mul(factor)
    }

    /// Runs `attempt` until it yields a usable response or the policy is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns the first non-transient error unchanged, or
    /// [`ApiError::ExhaustedRetries`] once every attempt has failed.
    pub async fn run<F, Fut>(&self, mut attempt: F) -> Result<RawResponse, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<RawResponse, ApiError>>,
    {
        let mut last_failure = String::new();

        for index in 0..self.max_attempts {
            match attempt().await {
                Ok(response) if response.body.is_null() => {
                    tracing::warn!(attempt = index + 1, "Empty response, retrying");
                    last_failure = format!("empty response (HTTP {})", response.status);
                }
                Ok(response) if response.is_rate_limited() => {
                    tracing::warn!(attempt = index + 1, "Rate limited, retrying");
                    last_failure = format!("rate limited (HTTP {})", response.status);
                }
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() => {
                    tracing::error!(attempt = index + 1, error = %e, "Request attempt failed");
                    last_failure = e.to_string();
                }
                Err(e) => return Err(e),
            }

            if index + 1 < self.max_attempts {
                tokio::time::sleep(self.delay_for(index)).await;
            }
        }

        tracing::error!(
            attempts = self.max_attempts,
            last_failure = %last_failure,
            "Requests keep failing, giving up"
        );
        Err(ApiError::ExhaustedRetries {
            attempts: self.max_attempts,
            last_failure,
        })
    }

    /// Executes `request` on `executor` under this policy.
    pub async fn execute(
        &self,
        executor: &dyn RequestExecutor,
        request: &ApiRequest,
    ) -> Result<RawResponse, ApiError> {
        self.run(|| executor.execute(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_backoff_is_quadratic() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(5));
        assert_eq!(policy.delay_for(3), Duration::from_secs(10));
        assert_eq!(policy.delay_for(14), Duration::from_secs(197));
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        assert_eq!(RetryPolicy::immediate(0).max_attempts(), 1);
    }

    #[tokio::test]
    async fn test_succeeds_on_fourth_call() {
        let calls = AtomicU32::new(0);
        let response = RetryPolicy::immediate(15)
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n <= 3 {
                        Ok(RawResponse::ok(Value::Null))
                    } else {
                        Ok(RawResponse::ok(json!({"id": "42"})))
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(response.body, json!({"id": "42"}));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_rate_limited_exhausts_after_fifteen_attempts() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::immediate(15)
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(RawResponse::ok(json!({"code": "TOO_MANY_REQUESTS"}))) }
            })
            .await;

        match result {
            Err(ApiError::ExhaustedRetries {
                attempts,
                last_failure,
            }) => {
                assert_eq!(attempts, 15);
                assert!(last_failure.contains("rate limited"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 15);
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let calls = AtomicU32::new(0);
        let response = RetryPolicy::immediate(5)
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    match n {
                        0 => Err(ApiError::Timeout),
                        1 => Err(ApiError::MalformedResponse {
                            status: 502,
                            body: "<html>".to_string(),
                        }),
                        _ => Ok(RawResponse::ok(json!({"balance": 10}))),
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(response.body["balance"], 10);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_transient_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::immediate(15)
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ApiError::InvalidRequest("bad header".to_string())) }
            })
            .await;

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_backoff_sleeps_without_blocking() {
        let started = tokio::time::Instant::now();
        let result = RetryPolicy::default()
            .run(|| async { Ok(RawResponse::ok(Value::Null)) })
            .await;

        assert!(matches!(result, Err(ApiError::ExhaustedRetries { attempts: 15, .. })));
        // Sum of i^2 + 1 for i in 0..14: no sleep after the last attempt.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(833));
        assert!(elapsed < Duration::from_secs(834));
    }
}
