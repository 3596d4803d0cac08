//
//  toloka-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings that shape how a [`TolokaClient`](crate::TolokaClient) talks to the
//! platform. Every field has a default, so an empty configuration targets
//! production with the standard timeout, poll interval and retry policy.
//!
//! ## Sources
//!
//! - [`ClientConfig::default`] / [`ClientConfig::for_environment`]
//! - [`ClientConfig::from_toml_str`] and [`ClientConfig::load`] for embedding in
//!   a host application's TOML configuration
//! - [`ClientConfig::from_env`] for `TOLOKA_*` environment overrides
//!
//! ## Example Configuration
//!
//! ```toml
//! environment = "sandbox"
//! timeout_secs = 30
//! poll_interval_secs = 5
//!
//! [retry]
//! max_attempts = 15
//! backoff_unit_ms = 1000
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `TOLOKA_SANDBOX` | `environment` (`1`/`true` selects the sandbox) |
//! | `TOLOKA_BASE_URL` | `base_url` |
//! | `TOLOKA_TIMEOUT_SECS` | `timeout_secs` |
//! | `TOLOKA_POLL_INTERVAL_SECS` | `poll_interval_secs` |

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::endpoints::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
use crate::api::RetryPolicy;

/// Platform host serving production requesters.
pub const PRODUCTION_HOST: &str = "https://toloka.yandex.ru";

/// Platform host serving the sandbox.
pub const SANDBOX_HOST: &str = "https://sandbox.toloka.yandex.ru";

/// Target platform environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live platform with real workers and money.
    #[default]
    Production,
    /// Sandbox for testing projects without spending money.
    Sandbox,
}

impl Environment {
    /// Maps the sandbox flag to an environment.
    pub fn from_sandbox(sandbox: bool) -> Self {
        if sandbox {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    /// Base URL of the environment.
    pub fn host(&self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_HOST,
            Self::Sandbox => SANDBOX_HOST,
        }
    }
}

/// Retry settings as they appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    /// Backoff unit in milliseconds; the delay after attempt `i` is
    /// `unit * (i^2 + 1)`.
    pub backoff_unit_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: RetryPolicy::DEFAULT_MAX_ATTEMPTS,
            backoff_unit_ms: RetryPolicy::DEFAULT_BACKOFF_UNIT.as_millis() as u64,
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Environment the client targets.
    pub environment: Environment,

    /// Overrides the environment host (proxies, test servers).
    pub base_url: Option<String>,

    /// Default per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Delay between operation status fetches in seconds.
    pub poll_interval_secs: u64,

    /// Retry settings.
    pub retry: RetrySettings,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            base_url: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            retry: RetrySettings::default(),
        }
    }
}

impl ClientConfig {
    /// Default configuration for `environment`.
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.host())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Retry policy built from [`RetrySettings`].
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.backoff_unit_ms),
        )
    }

    /// Parses a configuration from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse Toloka client configuration")
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Default configuration with `TOLOKA_*` environment overrides applied.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub(crate) fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(sandbox) = lookup("TOLOKA_SANDBOX") {
            let sandbox = matches!(
                sandbox.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
            self.environment = Environment::from_sandbox(sandbox);
        }
        if let Some(base_url) = lookup("TOLOKA_BASE_URL") {
            self.base_url = Some(base_url.trim().to_string());
        }
        if let Some(timeout) = lookup("TOLOKA_TIMEOUT_SECS") {
            self.timeout_secs = timeout
                .trim()
                .parse()
                .context("TOLOKA_TIMEOUT_SECS must be a whole number of seconds")?;
        }
        if let Some(interval) = lookup("TOLOKA_POLL_INTERVAL_SECS") {
            self.poll_interval_secs = interval
                .trim()
                .parse()
                .context("TOLOKA_POLL_INTERVAL_SECS must be a whole number of seconds")?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), PRODUCTION_HOST);
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_sandbox_host() {
        let config = ClientConfig::for_environment(Environment::from_sandbox(true));
        assert_eq!(config.base_url(), "https://sandbox.toloka.yandex.ru");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml_str(
            r#"
            environment = "sandbox"

            [retry]
            max_attempts = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.backoff_unit_ms, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://localhost:8080\"").unwrap();
        writeln!(file, "timeout_secs = 5").unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(ClientConfig::load("/nonexistent/toloka.toml").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::default()
            .with_overrides(|name| match name {
                "TOLOKA_SANDBOX" => Some("true".to_string()),
                "TOLOKA_POLL_INTERVAL_SECS" => Some("1".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let result = ClientConfig::default().with_overrides(|name| {
            (name == "TOLOKA_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert!(result.is_err());
    }
}
