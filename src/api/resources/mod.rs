//
//  toloka-client
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resource families of the Toloka API.
//!
//! Each submodule adds methods to [`TolokaClient`](crate::TolokaClient) for one
//! family of endpoints. Inputs are identifiers, free-form [`Query`](crate::Query)
//! parameters or JSON bodies forwarded verbatim; no local validation is done.
//!
//! - [`projects`]: Project lookup
//! - [`pools`]: Pool CRUD, open/close/archive, clone and rename
//! - [`tasks`]: Tasks, overlap changes, asynchronous batch upload
//! - [`task_suites`]: Task suites and their overlap
//! - [`assignments`]: Assignment listing, acceptance and rejection
//! - [`messages`]: Message threads
//! - [`bonuses`]: Single and batched bonus grants
//! - [`analytics`]: Analytics requests and account balance
//! - [`workers`]: Worker grid
//! - [`aggregation`]: Aggregation by pool and aggregated solutions

pub mod aggregation;
pub mod analytics;
pub mod assignments;
pub mod bonuses;
pub mod messages;
pub mod pools;
pub mod projects;
pub mod task_suites;
pub mod tasks;
pub mod workers;

pub use aggregation::AggregationRequest;
pub use bonuses::{tally_recipients, BonusMessage};

use serde_json::Value;

use super::common::ApiError;
use super::Result;

/// Sets `key` on a JSON object fetched from the platform.
pub(crate) fn set_field(object: &mut Value, key: &str, value: Value) -> Result<()> {
    match object.as_object_mut() {
        Some(map) => {
            map.insert(key.to_string(), value);
            Ok(())
        }
        None => Err(ApiError::Protocol(format!(
            "expected a JSON object to set `{}` on",
            key
        ))),
    }
}

/// Reads an identifier field that may be a string or a number.
pub(crate) fn id_field(object: &Value, key: &str) -> Result<String> {
    match object.get(key) {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(ApiError::Protocol(format!(
            "response has no `{}`: {}",
            key, object
        ))),
    }
}
