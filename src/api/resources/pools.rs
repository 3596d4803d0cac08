//
//  toloka-client
//  api/resources/pools.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pools API.
//!
//! A pool groups tasks with shared settings (pricing, overlap, filters).
//!
//! # Pool Lifecycle
//!
//! ```text
//! CLOSED -> OPEN -> CLOSED -> ... -> ARCHIVED
//! ```
//!
//! # Read-Modify-Write
//!
//! [`change_pool_name`](TolokaClient::change_pool_name),
//! [`change_pool_priority`](TolokaClient::change_pool_priority) and
//! [`clone_pool_and_change_name`](TolokaClient::clone_pool_and_change_name)
//! fetch the whole pool, change one field and `PUT` the whole object back.
//! There is no concurrency token, so a change made remotely between the fetch
//! and the `PUT` is overwritten.
//!
//! # Example
//!
//! ```rust,no_run
//! use toloka_client::{Query, TolokaClient};
//!
//! # async fn example(client: TolokaClient) -> Result<(), toloka_client::ApiError> {
//! let pools = client
//!     .get_all_pools(None, Query::new().with("project_id", 12).with("status", "OPEN"))
//!     .await?;
//! for pool in &pools {
//!     println!("{} {}", pool["id"], pool["private_name"]);
//! }
//!
//! let copy = client.clone_pool_and_change_name(42, "Copy").await?;
//! println!("new pool {}", copy["id"]);
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;

use serde_json::Value;

use super::{id_field, set_field};
use crate::api::common::{collect_cursor_pages, Cursor, Query};
use crate::api::endpoints::{page_size, ApiV1};
use crate::api::transport::ApiRequest;
use crate::api::{Result, TolokaClient};

impl TolokaClient {
    /// Lists one page of pools, e.g. filtered by `status` and `project_id`.
    pub async fn get_pools(&self, query: Query) -> Result<Value> {
        self.get(ApiV1::POOLS, query).await
    }

    /// Lists every pool matching `query`.
    ///
    /// # Parameters
    ///
    /// * `limit` - Page size; `None` uses [`page_size::POOLS`] (300)
    /// * `query` - Filters such as `project_id`, `status` or `created_gte`
    ///
    /// # Returns
    ///
    /// All matching pools in ascending `id` order.
    pub async fn get_all_pools(&self, limit: Option<u32>, query: Query) -> Result<Vec<Value>> {
        let limit = limit.unwrap_or(page_size::POOLS);
        collect_cursor_pages(Cursor::BY_ID, limit, query, |page| self.get_pools(page)).await
    }

    /// Fetches one pool with all of its settings.
    pub async fn get_pool(&self, pool_id: impl Display) -> Result<Value> {
        self.get(&format!("{}/{}", ApiV1::POOLS, pool_id), Query::new())
            .await
    }

    /// Creates a pool from a full pool object.
    ///
    /// # Parameters
    ///
    /// * `pool` - Pool settings, e.g. `project_id`, `private_name`,
    ///   `reward_per_assignment`, `defaults`
    ///
    /// # Returns
    ///
    /// The created pool, including its new `id`. The pool starts `CLOSED`.
    pub async fn create_pool(&self, pool: Value) -> Result<Value> {
        self.post(ApiV1::POOLS, Some(pool)).await
    }

    /// Replaces a pool with `pool` (full `PUT`).
    pub async fn update_pool(&self, pool_id: impl Display, pool: Value) -> Result<Value> {
        self.put(&format!("{}/{}", ApiV1::POOLS, pool_id), pool).await
    }

    /// Opens a pool to workers. The platform answers with an operation.
    pub async fn open_pool(&self, pool_id: impl Display) -> Result<Value> {
        self.pool_action(pool_id, "open").await
    }

    /// Closes a pool. The platform answers with an operation.
    pub async fn close_pool(&self, pool_id: impl Display) -> Result<Value> {
        self.pool_action(pool_id, "close").await
    }

    /// Archives a closed pool. The platform answers with an operation.
    pub async fn archive_pool(&self, pool_id: impl Display) -> Result<Value> {
        self.pool_action(pool_id, "archive").await
    }

    /// Starts a clone of the pool and returns the operation submission.
    pub async fn clone_pool(&self, pool_id: impl Display) -> Result<Value> {
        self.pool_action(pool_id, "clone").await
    }

    async fn pool_action(&self, pool_id: impl Display, action: &str) -> Result<Value> {
        self.post(&format!("{}/{}/{}", ApiV1::POOLS, pool_id, action), None)
            .await
    }

    /// Sets the pool's `priority` (read-modify-write).
    pub async fn change_pool_priority(&self, pool_id: impl Display, priority: i64) -> Result<Value> {
        let pool_id = pool_id.to_string();
        let mut pool = self.get_pool(&pool_id).await?;
        set_field(&mut pool, "priority", Value::from(priority))?;
        self.update_pool(&pool_id, pool).await
    }

    /// Sets the pool's `private_name` (read-modify-write).
    pub async fn change_pool_name(&self, pool_id: impl Display, name: &str) -> Result<Value> {
        let pool_id = pool_id.to_string();
        let mut pool = self.get_pool(&pool_id).await?;
        let old_name = pool
            .get("private_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        set_field(&mut pool, "private_name", Value::from(name))?;

        let updated = self.update_pool(&pool_id, pool).await?;
        tracing::info!(pool = %pool_id, old_name = %old_name, new_name = name, "Pool renamed");
        Ok(updated)
    }

    /// Clones a pool, waits for the clone and renames the copy.
    ///
    /// Returns the renamed pool as answered by the `PUT`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Protocol`](crate::ApiError::Protocol) when the
    /// finished clone operation does not report a `pool_id`.
    pub async fn clone_pool_and_change_name(
        &self,
        source_pool_id: impl Display,
        name: &str,
    ) -> Result<Value> {
        let operation_id = self
            .submit_operation(ApiRequest::post(format!(
                "{}/{}/clone",
                ApiV1::POOLS,
                source_pool_id
            )))
            .await?;
        let details = self.get_operation_result(&operation_id).await?;
        let new_pool_id = id_field(&details, "pool_id")?;

        self.change_pool_name(&new_pool_id, name).await
    }
}
