//
//  toloka-client
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Handling
//!
//! Format validation for Toloka secrets and lookup of a credential from the
//! process environment.
//!
//! ## Environment Variables
//!
//! | Variable | Credential |
//! |----------|------------|
//! | `TOLOKA_TOKEN` | [`AuthCredential::OAuth`] |
//! | `TOLOKA_API_KEY` | [`AuthCredential::ApiKey`] (used when no token is set) |
//!
//! ## Example
//!
//! ```rust,no_run
//! use toloka_client::auth::AuthCredential;
//!
//! fn credential() -> anyhow::Result<AuthCredential> {
//!     AuthCredential::from_env()
//! }
//! ```

use anyhow::{bail, Result};

use super::AuthCredential;

/// Environment variable holding an OAuth token.
pub const TOKEN_ENV: &str = "TOLOKA_TOKEN";

/// Environment variable holding an API key.
pub const API_KEY_ENV: &str = "TOLOKA_API_KEY";

/// Validates the format of a token string.
///
/// This is a format check only: the token must be non-empty and contain no
/// whitespace. Whether the platform accepts it is only known after a request.
///
/// # Example
///
/// ```rust
/// use toloka_client::auth::validate_token;
///
/// assert!(validate_token("AQAAAAAAbcd"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

impl AuthCredential {
    /// Reads a credential from `TOLOKA_TOKEN` or `TOLOKA_API_KEY`.
    ///
    /// # Errors
    ///
    /// Fails when neither variable is set or the value is not a valid token.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a credential from an arbitrary variable lookup.
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (credential, name) = if let Some(token) = lookup(TOKEN_ENV) {
            (AuthCredential::oauth(token.trim()), TOKEN_ENV)
        } else if let Some(key) = lookup(API_KEY_ENV) {
            (AuthCredential::api_key(key.trim()), API_KEY_ENV)
        } else {
            bail!("Neither {} nor {} is set", TOKEN_ENV, API_KEY_ENV);
        };

        let secret = match &credential {
            AuthCredential::OAuth { token } => token,
            AuthCredential::ApiKey { key } => key,
        };
        if !validate_token(secret) {
            bail!("{} does not contain a valid token", name);
        }

        Ok(credential)
    }
}
