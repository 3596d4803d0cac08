//
//  toloka-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Toloka authenticates every request with a static `Authorization` header.
//! There is no refresh flow; tokens are obtained out of band from the
//! requester profile.
//!
//! ## Supported Authentication Methods
//!
//! - **OAuth token**: sent as `Authorization: OAuth <token>`
//! - **API key**: sent as `Authorization: ApiKey <key>`
//!
//! ## Module Structure
//!
//! - [`token`]: Token format validation and environment lookup
//!
//! ## Example
//!
//! ```rust
//! use toloka_client::auth::AuthCredential;
//!
//! let credential = AuthCredential::oauth("AQAAAAAA");
//! assert_eq!(credential.header_value(), "OAuth AQAAAAAA");
//! ```

mod token;

pub use token::*;

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::api::ApiError;

/// Credential attached to every request.
///
/// `Debug` output never includes the secret.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// OAuth token issued for the requester account.
    OAuth {
        /// The token string.
        token: String,
    },
    /// API key created in the requester profile.
    ApiKey {
        /// The key string.
        key: String,
    },
}

impl AuthCredential {
    /// Creates an OAuth credential.
    pub fn oauth(token: impl Into<String>) -> Self {
        Self::OAuth {
            token: token.into(),
        }
    }

    /// Creates an API key credential.
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey { key: key.into() }
    }

    /// Returns the `Authorization` header value for this credential.
    pub fn header_value(&self) -> String {
        match self {
            Self::OAuth { token } => format!("OAuth {}", token),
            Self::ApiKey { key } => format!("ApiKey {}", key),
        }
    }

    /// Inserts the `Authorization` header into `headers`.
    ///
    /// The value is marked sensitive so it is redacted from `reqwest` debug
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] when the secret contains
    /// characters that are not valid in a header value.
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) -> Result<(), ApiError> {
        let mut value = HeaderValue::from_str(&self.header_value()).map_err(|_| {
            ApiError::InvalidRequest("credential is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    /// Returns the scheme name (`OAuth` or `ApiKey`).
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::OAuth { .. } => "OAuth",
            Self::ApiKey { .. } => "ApiKey",
        }
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredential")
            .field("scheme", &self.scheme())
            .field("secret", &"<redacted>")
            .finish()
    }
}
