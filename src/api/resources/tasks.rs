//
//  toloka-client
//  api/resources/tasks.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tasks API.
//!
//! Tasks are created either synchronously with [`TolokaClient::create_tasks`]
//! or as a server-side operation with [`TolokaClient::batch_upload_tasks`],
//! which waits for the upload to finish.

use std::fmt::Display;

use serde_json::{json, Value};

use crate::api::common::{collect_cursor_pages, Cursor, Query};
use crate::api::endpoints::{page_size, ApiV1, BATCH_UPLOAD_TIMEOUT};
use crate::api::operations::Operation;
use crate::api::transport::ApiRequest;
use crate::api::{Result, TolokaClient};

impl TolokaClient {
    /// Lists one page of tasks.
    pub async fn get_tasks(&self, query: Query) -> Result<Value> {
        self.get(ApiV1::TASKS, query).await
    }

    /// Lists every task of a pool.
    ///
    /// # Parameters
    ///
    /// * `pool_id` - Pool to list; a `pool_id` in `query` takes precedence
    /// * `limit` - Page size; `None` uses [`page_size::TASKS`] (1000)
    /// * `query` - Additional filters
    pub async fn get_all_tasks(
        &self,
        pool_id: impl Display,
        limit: Option<u32>,
        query: Query,
    ) -> Result<Vec<Value>> {
        let limit = limit.unwrap_or(page_size::TASKS);
        let base = Query::new().with("pool_id", pool_id).merged(&query);
        collect_cursor_pages(Cursor::BY_ID, limit, base, |page| self.get_tasks(page)).await
    }

    /// Fetches one task.
    pub async fn get_task(&self, task_id: impl Display) -> Result<Value> {
        self.get(&format!("{}/{}", ApiV1::TASKS, task_id), Query::new())
            .await
    }

    /// Creates one task or a list of tasks.
    ///
    /// `query` is forwarded as is (e.g. `allow_defaults`, `open_pool`).
    pub async fn create_tasks(&self, tasks: Value, query: Query) -> Result<Value> {
        self.send(ApiRequest::post(ApiV1::TASKS).query(query).json(tasks))
            .await
    }

    /// Changes how many workers must complete a task.
    pub async fn patch_task_overlap(&self, task_id: impl Display, overlap: u32) -> Result<Value> {
        self.patch(
            &format!("{}/{}", ApiV1::TASKS, task_id),
            json!({ "overlap": overlap }),
        )
        .await
    }

    /// Uploads tasks asynchronously and waits for the upload operation.
    ///
    /// Returns the finished operation; a `FAIL` status is not turned into an
    /// error, inspect [`Operation::status`].
    pub async fn batch_upload_tasks(&self, tasks: Vec<Value>) -> Result<Operation> {
        let count = tasks.len();
        let request = ApiRequest::post(ApiV1::TASKS)
            .query(
                Query::new()
                    .with("async_mode", true)
                    .with("allow_defaults", true),
            )
            .json(Value::Array(tasks))
            .timeout(BATCH_UPLOAD_TIMEOUT);

        let operation_id = self.submit_operation(request).await?;
        tracing::info!(operation = %operation_id, tasks = count, "Uploading tasks");
        self.wait_for_operation(&operation_id).await
    }
}
