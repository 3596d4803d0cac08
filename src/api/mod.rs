//
//  toloka-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP plumbing and the resource facade for the
//! Toloka REST API.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`transport`]: Request descriptors and the [`RequestExecutor`] seam, with
//!   a `reqwest`-backed implementation
//! - [`retry`]: The [`RetryPolicy`] that wraps an executor call
//! - [`client`]: The [`TolokaClient`] facade and its generic request helpers
//! - [`common`]: Shared types (errors, query parameters, status enumerations,
//!   pagination)
//! - [`endpoints`]: The fixed endpoint path table
//! - [`operations`]: Long-running operation polling
//! - [`resources`]: One module per resource family
//!
//! ## Error Handling
//!
//! Every call returns `Result<T, ApiError>`:
//!
//! - `Timeout`, `Network`, `MalformedResponse`: transient, retried internally
//! - `ExhaustedRetries`: all attempts were used without a usable result
//! - `Protocol`: the response lacked a field the client relies on
//! - `Remote`: the platform rejected the request; payload kept verbatim

/// The resource facade.
pub mod client;

/// Shared API types.
pub mod common;

/// Endpoint path table and platform constants.
pub mod endpoints;

/// Operation polling.
pub mod operations;

/// Resource-family methods on [`TolokaClient`].
pub mod resources;

/// Retry policy.
pub mod retry;

/// Request executor seam and the HTTP implementation.
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::TolokaClient;
pub use common::{ApiError, Cursor, Page, Query};
pub use operations::{Operation, OperationStatus};
pub use retry::RetryPolicy;
pub use transport::{ApiRequest, HttpExecutor, RawResponse, RequestExecutor};

/// Result alias used across the API layer.
pub type Result<T, E = ApiError> = std::result::Result<T, E>;
