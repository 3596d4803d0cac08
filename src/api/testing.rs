//
//  toloka-client
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Scripted executor for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::common::ApiError;
use super::retry::RetryPolicy;
use super::transport::{ApiRequest, RawResponse, RequestExecutor};
use super::TolokaClient;

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub(crate) struct ScriptedExecutor {
    responses: Mutex<VecDeque<Result<RawResponse, ApiError>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues a `200 OK` with `body`.
    pub(crate) fn respond(self, body: Value) -> Self {
        self.respond_with(Ok(RawResponse::ok(body)))
    }

    pub(crate) fn respond_with(self, outcome: Result<RawResponse, ApiError>) -> Self {
        self.responses.lock().unwrap().push_back(outcome);
        self
    }

    /// Builds a client that retries without delay and polls without delay.
    pub(crate) fn into_client(self) -> (TolokaClient, Arc<Mutex<Vec<ApiRequest>>>) {
        let requests = Arc::clone(&self.requests);
        let client = TolokaClient::with_executor(self)
            .with_retry_policy(RetryPolicy::immediate(RetryPolicy::DEFAULT_MAX_ATTEMPTS))
            .with_poll_interval(Duration::ZERO);
        (client, requests)
    }
}

#[async_trait]
impl RequestExecutor for ScriptedExecutor {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Protocol(format!("unscripted request: {}", request.path))))
    }
}

/// `(method, path)` pairs of the recorded requests.
pub(crate) fn routes(requests: &Mutex<Vec<ApiRequest>>) -> Vec<(String, String)> {
    requests
        .lock()
        .unwrap()
        .iter()
        .map(|r| (r.method.to_string(), r.path.clone()))
        .collect()
}
