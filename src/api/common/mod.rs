//
//  toloka-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! This module provides shared types used across the transport, retry,
//! pagination and resource layers.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`Query`] - Free-form query parameters forwarded verbatim
//! - Status enumerations (re-exported from the `status` submodule)
//! - Pagination types and routines (re-exported from the `pagination` submodule)
//!
//! # Example
//!
//! ```rust
//! use toloka_client::api::common::ApiError;
//!
//! fn describe<T>(result: Result<T, ApiError>) -> String {
//!     match result {
//!         Ok(_) => "ok".to_string(),
//!         Err(ApiError::Remote { code, .. }) => format!("rejected: {:?}", code),
//!         Err(ApiError::ExhaustedRetries { attempts, .. }) => {
//!             format!("gave up after {} attempts", attempts)
//!         }
//!         Err(e) => e.to_string(),
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

mod pagination;
mod status;

pub use pagination::*;
pub use status::*;

/// Unified error type for all Toloka API operations.
///
/// # Variants
///
/// | Variant | Description | Retried |
/// |---------|-------------|---------|
/// | `Timeout` | The request exceeded its timeout | yes |
/// | `Network` | Connection or other transport failure | yes |
/// | `MalformedResponse` | Body was not JSON | yes |
/// | `ExhaustedRetries` | Every attempt failed or was rate limited | no |
/// | `Protocol` | A field the client relies on was missing | no |
/// | `Remote` | The platform answered with an error status | no |
/// | `InvalidRequest` | The request could not be built | no |
/// | `Json` | A typed (de)serialization failed | no |
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request did not complete within its timeout.
    #[error("Request timed out")]
    Timeout,

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be parsed as JSON.
    ///
    /// The raw body is kept for diagnostics.
    #[error("Malformed response (HTTP {status}): {body}")]
    MalformedResponse {
        /// HTTP status of the response
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Every attempt allowed by the retry policy failed or was rate limited.
    #[error("Gave up after {attempts} attempts: {last_failure}")]
    ExhaustedRetries {
        /// Number of attempts made
        attempts: u32,
        /// Description of the last failed attempt
        last_failure: String,
    },

    /// The response lacked a field the client needs to continue
    /// (listing `items`, operation `id`, ...).
    #[error("Protocol violation: {0}")]
    Protocol(String),

    /// The platform rejected the request.
    ///
    /// `payload` is the response body exactly as returned.
    #[error("Remote error (HTTP {status}): {}", .code.as_deref().unwrap_or("no error code"))]
    Remote {
        /// HTTP status of the response
        status: u16,
        /// Value of the payload's `code` field, if any
        code: Option<String>,
        /// The error body, verbatim
        payload: Value,
    },

    /// The request could not be built (invalid URL, header name or value).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A typed response could not be deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns `true` for failures worth another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Network(_) | Self::MalformedResponse { .. }
        )
    }

    /// Returns the verbatim remote payload for [`ApiError::Remote`].
    pub fn remote_payload(&self) -> Option<&Value> {
        match self {
            Self::Remote { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Query-string parameters forwarded verbatim to the platform.
///
/// Keys are unique; setting an existing key replaces its value.
///
/// # Example
///
/// ```rust
/// use toloka_client::Query;
///
/// let query = Query::new()
///     .with("project_id", 42)
///     .with("status", "OPEN");
///
/// assert_eq!(query.get("project_id"), Some("42"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(BTreeMap<String, String>);

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value` and returns the query for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Returns the value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Copies every entry of `other` into this query. Entries of `other` win.
    pub fn merged(mut self, other: &Query) -> Self {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
        self
    }

    /// Returns `true` when no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.set(key, value);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_set_replaces_value() {
        let mut query = Query::new().with("limit", 10);
        query.set("limit", 20);
        assert_eq!(query.get("limit"), Some("20"));
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn test_query_merged_prefers_other() {
        let defaults = Query::new().with("sort", "id").with("limit", 300);
        let user = Query::new().with("limit", 5).with("status", "OPEN");
        let merged = defaults.merged(&user);
        assert_eq!(merged.get("sort"), Some("id"));
        assert_eq!(merged.get("limit"), Some("5"));
        assert_eq!(merged.get("status"), Some("OPEN"));
    }

    #[test]
    fn test_query_serializes_as_flat_map() {
        let query: Query = [("pool_id", "7"), ("sort", "id")].into_iter().collect();
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"pool_id": "7", "sort": "id"}));
    }

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::Timeout.is_transient());
        assert!(ApiError::MalformedResponse {
            status: 502,
            body: "<html>".to_string()
        }
        .is_transient());
        assert!(!ApiError::Protocol("missing items".to_string()).is_transient());
        assert!(!ApiError::ExhaustedRetries {
            attempts: 15,
            last_failure: "rate limited".to_string()
        }
        .is_transient());
    }

    #[test]
    fn test_remote_error_display_uses_code() {
        let err = ApiError::Remote {
            status: 400,
            code: Some("VALIDATION_ERROR".to_string()),
            payload: serde_json::json!({"code": "VALIDATION_ERROR"}),
        };
        assert_eq!(err.to_string(), "Remote error (HTTP 400): VALIDATION_ERROR");
        assert_eq!(
            err.remote_payload(),
            Some(&serde_json::json!({"code": "VALIDATION_ERROR"}))
        );
    }
}
