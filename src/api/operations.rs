//
//  toloka-client
//  api/operations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Long-running operations.
//!
//! Pool cloning, asynchronous task upload, bonus grants and aggregation run as
//! server-side operations. Submitting one returns an operation handle whose
//! status is then fetched at a fixed interval until it leaves `PENDING` and
//! `RUNNING`.
//!
//! # Operation Lifecycle
//!
//! ```text
//! PENDING -> RUNNING -> SUCCESS
//!                   \-> FAIL
//! ```
//!
//! The poller does not judge the outcome: any status other than `PENDING` or
//! `RUNNING` ends polling and the terminal [`Operation`] is handed back.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::common::ApiError;
use super::endpoints::ApiV1;
use super::transport::ApiRequest;
use super::{Result, TolokaClient};

/// Status of a server-side operation.
///
/// Values the client does not know are preserved in [`OperationStatus::Other`]
/// so they serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationStatus {
    Pending,
    Running,
    Success,
    Fail,
    Other(String),
}

impl OperationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Success => "SUCCESS",
            Self::Fail => "FAIL",
            Self::Other(status) => status,
        }
    }

    /// `true` while the operation is queued or executing.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

impl From<String> for OperationStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "PENDING" => Self::Pending,
            "RUNNING" => Self::Running,
            "SUCCESS" => Self::Success,
            "FAIL" => Self::Fail,
            _ => Self::Other(status),
        }
    }
}

impl From<OperationStatus> for String {
    fn from(status: OperationStatus) -> Self {
        match status {
            OperationStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A server-side asynchronous operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation identifier.
    pub id: String,

    /// Operation type, e.g. `POOL.CLONE` or `TASK.BATCH_CREATE`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    pub status: OperationStatus,

    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub submitted: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub started: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub finished: Option<DateTime<Utc>>,

    /// Completion percentage.
    #[serde(default)]
    pub progress: Option<u32>,

    /// Parameters the operation was submitted with.
    #[serde(default)]
    pub parameters: Option<Value>,

    /// Result payload (e.g. `{"pool_id": "..."}` for a clone).
    #[serde(default)]
    pub details: Option<Value>,
}

/// Parses a platform timestamp.
///
/// The platform sends ISO-8601 without a zone (`2024-05-01T10:15:00.123`),
/// which is UTC; RFC 3339 with an offset is accepted as well.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|raw| {
        parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    })
    .transpose()
}

/// Reads the `id` of a freshly submitted operation.
///
/// # Errors
///
/// Returns [`ApiError::Protocol`] carrying the response when `id` is absent.
pub fn operation_id(submission: &Value) -> Result<String> {
    match submission.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(ApiError::Protocol(format!(
            "operation submission has no id: {}",
            submission
        ))),
    }
}

impl TolokaClient {
    /// Fetches the current state of an operation.
    pub async fn get_operation(&self, operation_id: &str) -> Result<Operation> {
        self.send_as(ApiRequest::get(format!("{}/{}", ApiV1::OPERATIONS, operation_id)))
            .await
    }

    /// Polls an operation until it leaves `PENDING`/`RUNNING`.
    ///
    /// The first fetch happens immediately; each further fetch follows the
    /// client's poll interval. Returns the operation as reported by the last
    /// fetch, whatever its terminal status.
    pub async fn wait_for_operation(&self, operation_id: &str) -> Result<Operation> {
        loop {
            let operation = self.get_operation(operation_id).await?;
            if !operation.status.is_active() {
                tracing::info!(
                    operation = operation_id,
                    status = %operation.status,
                    "Operation finished"
                );
                return Ok(operation);
            }

            tracing::debug!(
                operation = operation_id,
                status = %operation.status,
                progress = operation.progress.unwrap_or(0),
                "Operation in progress"
            );
            tokio::time::sleep(self.poll_interval()).await;
        }
    }

    /// Polls a bonus-grant operation; `false` when it ended in `FAIL`.
    pub async fn wait_for_bonus_operation(&self, operation_id: &str) -> Result<bool> {
        let operation = self.wait_for_operation(operation_id).await?;
        Ok(operation.status != OperationStatus::Fail)
    }

    /// Polls an operation and returns its `details` (`null` when absent).
    pub async fn get_operation_result(&self, operation_id: &str) -> Result<Value> {
        let operation = self.wait_for_operation(operation_id).await?;
        Ok(operation.details.unwrap_or(Value::Null))
    }

    /// Sends a request that starts an operation and returns the operation id.
    pub(crate) async fn submit_operation(&self, request: ApiRequest) -> Result<String> {
        let submission = self.send(request).await?;
        let id = operation_id(&submission)?;
        tracing::info!(operation = %id, "Created operation");
        Ok(id)
    }
}
