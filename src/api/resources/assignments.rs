//
//  toloka-client
//  api/resources/assignments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Assignments API.
//!
//! Reviewing a submitted assignment is a `PATCH` of its `status` (and
//! optionally `public_comment`). Those calls use a shorter 10 second timeout.

use std::fmt::Display;

use serde_json::{json, Value};

use crate::api::common::{collect_cursor_pages, AssignmentStatus, Cursor, Query};
use crate::api::endpoints::{page_size, ApiV1, ASSIGNMENT_STATUS_TIMEOUT};
use crate::api::transport::ApiRequest;
use crate::api::{Result, TolokaClient};

impl TolokaClient {
    /// Lists one page of assignments.
    pub async fn get_assignments(&self, query: Query) -> Result<Value> {
        self.get(ApiV1::ASSIGNMENTS, query).await
    }

    /// Lists every assignment of a pool.
    ///
    /// # Parameters
    ///
    /// * `pool_id` - Pool whose assignments are listed
    /// * `limit` - Page size; `None` uses [`page_size::ASSIGNMENTS`] (1000)
    /// * `query` - Filters such as `status` or `submitted_gte`
    pub async fn get_all_assignments(
        &self,
        pool_id: impl Display,
        limit: Option<u32>,
        query: Query,
    ) -> Result<Vec<Value>> {
        let limit = limit.unwrap_or(page_size::ASSIGNMENTS);
        let base = Query::new().with("pool_id", pool_id).merged(&query);
        collect_cursor_pages(Cursor::BY_ID, limit, base, |page| {
            self.get_assignments(page)
        })
        .await
    }

    /// Fetches one assignment with its solutions.
    pub async fn get_assignment(&self, assignment_id: impl Display) -> Result<Value> {
        self.get(
            &format!("{}/{}", ApiV1::ASSIGNMENTS, assignment_id),
            Query::new(),
        )
        .await
    }

    /// Patches an assignment with an arbitrary status body, e.g.
    /// `{"status": "REJECTED", "public_comment": "..."}`.
    pub async fn set_assignment_status(
        &self,
        assignment_id: impl Display,
        body: Value,
    ) -> Result<Value> {
        self.send(
            ApiRequest::patch(format!("{}/{}", ApiV1::ASSIGNMENTS, assignment_id))
                .json(body)
                .timeout(ASSIGNMENT_STATUS_TIMEOUT),
        )
        .await
    }

    /// Accepts an assignment; an empty or absent comment is left out.
    pub async fn accept_assignment(
        &self,
        assignment_id: impl Display,
        public_comment: Option<&str>,
    ) -> Result<Value> {
        let mut body = json!({ "status": AssignmentStatus::Accepted });
        if let Some(comment) = public_comment.filter(|c| !c.is_empty()) {
            body["public_comment"] = Value::from(comment);
        }
        self.set_assignment_status(assignment_id, body).await
    }

    /// Rejects an assignment; the platform requires a comment.
    pub async fn reject_assignment(
        &self,
        assignment_id: impl Display,
        public_comment: &str,
    ) -> Result<Value> {
        self.set_assignment_status(
            assignment_id,
            json!({
                "status": AssignmentStatus::Rejected,
                "public_comment": public_comment,
            }),
        )
        .await
    }
}
