//
//  toloka-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Toloka Client
//!
//! The [`TolokaClient`] facade: construction, retry and polling settings, and
//! the generic request helpers every resource method is built from.
//!
//! ## Features
//!
//! - Production or sandbox environment chosen at construction
//! - Every request goes through the [`RetryPolicy`]
//! - Non-2xx responses become [`ApiError::Remote`] carrying the body verbatim
//! - Cheap to clone; clones share one connection pool

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::common::{ApiError, Query};
use super::endpoints::DEFAULT_POLL_INTERVAL;
use super::retry::RetryPolicy;
use super::transport::{ApiRequest, HttpExecutor, RawResponse, RequestExecutor};
use super::Result;
use crate::auth::AuthCredential;
use crate::config::{ClientConfig, Environment};

/// Client for the Toloka REST API.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use toloka_client::{AuthCredential, ClientConfig, TolokaClient};
///
/// // OAuth token against the sandbox
/// let sandbox = TolokaClient::new("my-oauth-token", true)?;
///
/// // Explicit configuration
/// let config = ClientConfig::from_env().expect("bad TOLOKA_* variables");
/// let client = TolokaClient::from_config(&config, &AuthCredential::api_key("my-key"))?;
/// # Ok::<(), toloka_client::ApiError>(())
/// ```
///
/// # Failure Semantics
///
/// Methods never panic or exit on remote failures. Transient failures are
/// retried per the client's [`RetryPolicy`]; anything else is an [`ApiError`].
#[derive(Clone)]
pub struct TolokaClient {
    executor: Arc<dyn RequestExecutor>,
    retry: RetryPolicy,
    poll_interval: Duration,
}

impl TolokaClient {
    /// Creates a client authenticated with an OAuth token.
    ///
    /// `sandbox` selects the sandbox environment instead of production.
    ///
    /// # Errors
    ///
    /// Fails if the token is not a valid header value or the HTTP client
    /// cannot be built.
    pub fn new(oauth_token: &str, sandbox: bool) -> Result<Self> {
        let config = ClientConfig::for_environment(Environment::from_sandbox(sandbox));
        Self::from_config(&config, &AuthCredential::oauth(oauth_token))
    }

    /// Creates a client from a configuration and a credential.
    pub fn from_config(config: &ClientConfig, auth: &AuthCredential) -> Result<Self> {
        let executor = HttpExecutor::with_timeout(config.base_url(), auth, config.timeout())?;
        Ok(Self::with_executor(executor)
            .with_retry_policy(config.retry_policy())
            .with_poll_interval(config.poll_interval()))
    }

    /// Creates a client over any [`RequestExecutor`], with default retry and
    /// poll settings.
    pub fn with_executor<E: RequestExecutor + 'static>(executor: E) -> Self {
        Self {
            executor: Arc::new(executor),
            retry: RetryPolicy::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Replaces the retry policy applied to every request.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use toloka_client::api::RetryPolicy;
    /// use toloka_client::TolokaClient;
    ///
    /// let client = TolokaClient::new("token", true)
    ///     .unwrap()
    ///     .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(200)));
    /// assert_eq!(client.retry_policy().max_attempts(), 3);
    /// ```
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the delay between operation status fetches.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Returns the retry policy in use.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns the delay between operation status fetches.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Sends `request` under the retry policy and returns the JSON body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::ExhaustedRetries`] when no attempt produced a usable
    ///   response
    /// - [`ApiError::Remote`] when the platform answered with a non-2xx status
    /// - any non-transient error from the executor
    pub async fn send(&self, request: ApiRequest) -> Result<Value> {
        tracing::info!(method = %request.method, path = %request.path, "Sending request");
        let response = self.retry.execute(self.executor.as_ref(), &request).await?;
        into_body(response)
    }

    /// Like [`send`](Self::send), deserializing the body into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// `GET path` with query parameters.
    pub async fn get(&self, path: &str, query: Query) -> Result<Value> {
        self.send(ApiRequest::get(path).query(query)).await
    }

    /// `POST path`, with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        let mut request = ApiRequest::post(path);
        request.body = body;
        self.send(request).await
    }

    /// `PUT path` with a JSON body.
    pub async fn put(&self, path: &str, body: Value) -> Result<Value> {
        self.send(ApiRequest::put(path).json(body)).await
    }

    /// `PATCH path` with a JSON body.
    pub async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.send(ApiRequest::patch(path).json(body)).await
    }
}

impl std::fmt::Debug for TolokaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TolokaClient")
            .field("retry", &self.retry)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

/// Turns a response that survived the retry policy into its body.
fn into_body(response: RawResponse) -> Result<Value> {
    if response.status.is_success() {
        return Ok(response.body);
    }

    let code = response
        .body
        .get("code")
        .and_then(Value::as_str)
        .map(str::to_owned);
    tracing::error!(
        status = %response.status,
        code = code.as_deref().unwrap_or("-"),
        payload = %response.body,
        "Request rejected"
    );
    Err(ApiError::Remote {
        status: response.status.as_u16(),
        code,
        payload: response.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    #[test]
    fn test_success_body_passes_through() {
        let body = into_body(RawResponse::ok(json!([1, 2, 3]))).unwrap();
        assert_eq!(body, json!([1, 2, 3]));
    }

    #[test]
    fn test_error_status_becomes_remote() {
        let payload = json!({"code": "DOES_NOT_EXIST", "message": "Pool not found"});
        let err = into_body(RawResponse::new(StatusCode::NOT_FOUND, payload.clone())).unwrap_err();
        match err {
            ApiError::Remote {
                status,
                code,
                payload: returned,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code.as_deref(), Some("DOES_NOT_EXIST"));
                assert_eq!(returned, payload);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_from_config_applies_settings() {
        let mut config = ClientConfig::for_environment(Environment::Sandbox);
        config.poll_interval_secs = 1;
        config.retry.max_attempts = 3;

        let client = TolokaClient::from_config(&config, &AuthCredential::oauth("t")).unwrap();
        assert_eq!(client.poll_interval(), Duration::from_secs(1));
        assert_eq!(client.retry_policy().max_attempts(), 3);
    }
}
