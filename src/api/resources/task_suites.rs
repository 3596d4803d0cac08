//
//  toloka-client
//  api/resources/task_suites.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Task suites API.

use std::fmt::Display;

use serde_json::{json, Value};

use crate::api::common::{collect_cursor_pages, Cursor, Query};
use crate::api::endpoints::{page_size, ApiV1};
use crate::api::{Result, TolokaClient};

impl TolokaClient {
    /// Lists one page of task suites, e.g. filtered by `pool_id`.
    pub async fn get_task_suites(&self, query: Query) -> Result<Value> {
        self.get(ApiV1::TASK_SUITES, query).await
    }

    /// Lists every task suite of a pool.
    pub async fn get_all_task_suites(&self, pool_id: impl Display) -> Result<Vec<Value>> {
        collect_cursor_pages(
            Cursor::BY_ID,
            page_size::TASK_SUITES,
            Query::new().with("pool_id", pool_id),
            |page| self.get_task_suites(page),
        )
        .await
    }

    /// Fetches one task suite.
    pub async fn get_task_suite(&self, task_suite_id: impl Display) -> Result<Value> {
        self.get(
            &format!("{}/{}", ApiV1::TASK_SUITES, task_suite_id),
            Query::new(),
        )
        .await
    }

    /// Changes the overlap of a task suite.
    ///
    /// Lowering the overlap below the number of assignments already issued
    /// closes the suite for new workers.
    pub async fn patch_task_suite_overlap(
        &self,
        task_suite_id: impl Display,
        overlap: u32,
    ) -> Result<Value> {
        self.patch(
            &format!("{}/{}", ApiV1::TASK_SUITES, task_suite_id),
            json!({ "overlap": overlap }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::ScriptedExecutor;
    use serde_json::json;

    #[tokio::test]
    async fn test_all_task_suites_use_page_of_100() {
        let (client, requests) = ScriptedExecutor::new()
            .respond(json!({"items": [{"id": "s1"}, {"id": "s2"}], "has_more": false}))
            .into_client();

        let suites = client.get_all_task_suites("p1").await.unwrap();
        assert_eq!(suites.len(), 2);

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/api/v1/task-suites");
        assert_eq!(requests[0].query.get("limit"), Some("100"));
        assert_eq!(requests[0].query.get("pool_id"), Some("p1"));
    }
}
