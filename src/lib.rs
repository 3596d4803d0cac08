//
//  toloka-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Toloka Client Library
//!
//! An async client library for the Toloka crowdsourcing platform's REST API.
//!
//! ## Overview
//!
//! The library wraps the platform's JSON endpoints for projects, pools, tasks,
//! task suites, assignments, messages, bonuses, operations, analytics, balance,
//! worker listings and aggregated solutions behind a single [`TolokaClient`].
//!
//! ## Features
//!
//! - **Retrying Transport**: Every request is retried on timeouts, transport
//!   failures, unparseable bodies and rate limiting, with a non-blocking
//!   quadratic backoff
//! - **Pagination**: Cursor-paginated listings are drained into a single vector
//! - **Operations**: Asynchronous server-side jobs (pool clone, task upload,
//!   bonus grant, aggregation) are polled to completion
//! - **Typed Errors**: Every failure surfaces as an [`ApiError`] variant instead
//!   of terminating the process
//!
//! ## Module Structure
//!
//! - [`api`]: Transport, retry policy, pagination, operation polling and resource methods
//! - [`auth`]: Authorization header credentials
//! - [`config`]: Client configuration (environment, timeouts, retry and poll settings)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use toloka_client::{Query, TolokaClient};
//!
//! # async fn example() -> Result<(), toloka_client::ApiError> {
//! let client = TolokaClient::new("my-oauth-token", true)?;
//!
//! let open_pools = client
//!     .get_all_pools(None, Query::new().with("status", "OPEN"))
//!     .await?;
//! println!("{} open pools", open_pools.len());
//! # Ok(())
//! # }
//! ```

/// Toloka REST API client.
///
/// Provides the request executor, retry policy, pagination helpers, operation
/// poller and the [`TolokaClient`] resource facade.
pub mod api;

/// Authentication credentials.
///
/// Toloka accepts OAuth tokens and API keys, both sent as a static
/// `Authorization` header on every request.
pub mod auth;

/// Client configuration.
///
/// Holds the target environment (production or sandbox), request timeout,
/// poll interval and retry settings. Loadable from TOML or the environment.
pub mod config;

pub use api::common::{ApiError, Query};
pub use api::TolokaClient;
pub use auth::AuthCredential;
pub use config::{ClientConfig, Environment};

/// Library version constant.
///
/// Derived from Cargo.toml at compile time and sent in the `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
