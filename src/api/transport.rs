//
//  toloka-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Execution
//!
//! A single HTTP exchange, without retries.
//!
//! - [`ApiRequest`] describes the call (method, path, header overrides, query,
//!   JSON body, timeout override).
//! - [`RequestExecutor`] is the seam the retry policy and the client are built
//!   on; tests substitute their own implementation.
//! - [`HttpExecutor`] executes requests with one pooled `reqwest` client.
//!
//! The body is parsed as JSON whatever the HTTP status, so platform error
//! payloads reach the caller intact.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use url::Url;

use super::common::{ApiError, Query};
use super::endpoints::{DEFAULT_TIMEOUT, TOO_MANY_REQUESTS};
use crate::auth::AuthCredential;

/// Description of one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the environment host, e.g. `/api/v1/pools/1`.
    pub path: String,
    /// Headers that replace defaults of the same name.
    pub headers: Vec<(String, String)>,
    /// Query-string parameters.
    pub query: Query,
    /// JSON body.
    pub body: Option<Value>,
    /// Overrides the executor's default timeout.
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Creates a request with no query, body, header overrides or timeout.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use toloka_client::api::ApiRequest;
    /// use toloka_client::Query;
    ///
    /// let request = ApiRequest::get("/api/v1/pools")
    ///     .query(Query::new().with("status", "OPEN"))
    ///     .timeout(Duration::from_secs(5));
    /// assert_eq!(request.query.get("status"), Some("OPEN"));
    /// ```
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            query: Query::new(),
            body: None,
            timeout: None,
        }
    }

    /// `GET` request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request for `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` request for `path`.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `PATCH` request for `path`.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Replaces the query parameters.
    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Sets the JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header override.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Status and parsed body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Parsed JSON body; `{}` for an empty successful body.
    pub body: Value,
}

impl RawResponse {
    /// Pairs a status with its parsed body.
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Shorthand for a `200 OK` response.
    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// `true` for HTTP 429 or a body whose `code` is `TOO_MANY_REQUESTS`.
    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
            || self.body.get("code").and_then(Value::as_str) == Some(TOO_MANY_REQUESTS)
    }
}

/// Executes a single request without retrying.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Performs `request` once.
    ///
    /// Implementations return transient [`ApiError`] variants
    /// (`Timeout`, `Network`, `MalformedResponse`) for failures worth retrying.
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError>;
}

/// [`RequestExecutor`] backed by a pooled `reqwest` client.
///
/// Every request carries the credential's `Authorization` header and
/// `Content-Type: application/json`, unless the request overrides them.
/// The connection pool is released when the executor is dropped.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    http: Client,
    base_url: String,
    default_headers: HeaderMap,
    default_timeout: Duration,
}

impl HttpExecutor {
    /// Creates an executor for `base_url` with the default 60 second timeout.
    pub fn new(base_url: &str, auth: &AuthCredential) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, auth, DEFAULT_TIMEOUT)
    }

    /// Creates an executor with a custom default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for an unparseable base URL or a
    /// credential that is not a valid header value, and
    /// [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn with_timeout(
        base_url: &str,
        auth: &AuthCredential,
        default_timeout: Duration,
    ) -> Result<Self, ApiError> {
        Url::parse(base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid base URL {}: {}", base_url, e)))?;

        let mut default_headers = HeaderMap::new();
        auth.apply_to_headers(&mut default_headers)?;
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("toloka-client/{}", crate::VERSION))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers,
            default_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        Url::parse(&url).map_err(|e| ApiError::InvalidRequest(format!("invalid URL {}: {}", url, e)))
    }

    fn headers_for(&self, request: &ApiRequest) -> Result<HeaderMap, ApiError> {
        let mut headers = self.default_headers.clone();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ApiError::InvalidRequest(format!("invalid header name: {}", name)))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                ApiError::InvalidRequest(format!("invalid value for header {}", name))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

/// Maps a `reqwest` failure onto the error taxonomy.
fn classify(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else if error.is_builder() {
        ApiError::InvalidRequest(error.to_string())
    } else {
        ApiError::Network(error)
    }
}

/// Parses a response body as JSON.
///
/// An empty successful body becomes an empty object. Anything that is not
/// JSON is a [`ApiError::MalformedResponse`].
fn parse_body(
    status: StatusCode,
    content_type: Option<&str>,
    text: String,
) -> Result<Value, ApiError> {
    if text.trim().is_empty() && status.is_success() {
        return Ok(Value::Object(Default::default()));
    }

    if let Some(content_type) = content_type {
        if !content_type.contains("json") {
            return Err(ApiError::MalformedResponse {
                status: status.as_u16(),
                body: text,
            });
        }
    }

    serde_json::from_str(&text).map_err(|_| ApiError::MalformedResponse {
        status: status.as_u16(),
        body: text,
    })
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.url_for(&request.path)?;
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .headers(self.headers_for(request)?)
            .timeout(request.timeout.unwrap_or(self.default_timeout));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(method = %request.method, %url, error = %e, "Request error");
            classify(e)
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await.map_err(classify)?;

        let body = parse_body(status, content_type.as_deref(), text).map_err(|e| {
            if let ApiError::MalformedResponse { body, .. } = &e {
                tracing::error!(method = %request.method, %url, %status, body = %body, "Response error");
            }
            e
        })?;

        Ok(RawResponse::new(status, body))
    }
}
