//
//  toloka-client
//  api/resources/aggregation.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Aggregation of pool results.
//!
//! Aggregation runs as an operation. Once it succeeds, the aggregated
//! solutions are listed under the operation id, sorted by `task_id`.
//!
//! # Example
//!
//! ```rust,no_run
//! use toloka_client::TolokaClient;
//!
//! # async fn example(client: TolokaClient) -> Result<(), toloka_client::ApiError> {
//! let solutions = client
//!     .get_aggregated_solutions(1001, 57, &["label"])
//!     .await?;
//! for solution in &solutions {
//!     println!("{} {}", solution["task_id"], solution["output_values"]);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::api::common::{collect_cursor_pages, Cursor, Query};
use crate::api::endpoints::{page_size, ApiV1, WEIGHTED_DYNAMIC_OVERLAP};
use crate::api::transport::ApiRequest;
use crate::api::{Result, TolokaClient};

/// Body of an aggregate-by-pool request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationRequest {
    pub pool_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub answer_weight_skill_id: String,
    pub fields: Vec<AggregationField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationField {
    pub name: String,
}

impl AggregationRequest {
    /// Weighted dynamic overlap aggregation of `fields`, weighted by a skill.
    pub fn weighted_dynamic_overlap(
        pool_id: impl Display,
        skill_id: impl Display,
        fields: &[&str],
    ) -> Self {
        Self {
            pool_id: pool_id.to_string(),
            kind: WEIGHTED_DYNAMIC_OVERLAP.to_string(),
            answer_weight_skill_id: skill_id.to_string(),
            fields: fields
                .iter()
                .map(|name| AggregationField {
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}

impl TolokaClient {
    /// Starts an aggregation; returns the operation submission.
    pub async fn start_aggregation(&self, request: Value) -> Result<Value> {
        self.post(ApiV1::AGGREGATE, Some(request)).await
    }

    /// One page of aggregated solutions produced by an operation.
    pub async fn get_aggregated_solutions_page(
        &self,
        operation_id: &str,
        query: Query,
    ) -> Result<Value> {
        self.get(
            &format!("{}{}", ApiV1::AGGREGATED_SOLUTIONS, operation_id),
            query,
        )
        .await
    }

    /// Every aggregated solution of an operation, `limit` per page.
    pub async fn get_all_aggregated_solutions(
        &self,
        operation_id: &str,
        limit: u32,
    ) -> Result<Vec<Value>> {
        collect_cursor_pages(Cursor::BY_TASK_ID, limit, Query::new(), |page| {
            self.get_aggregated_solutions_page(operation_id, page)
        })
        .await
    }

    /// Aggregates `fields` of a pool weighted by `skill_id` and returns every
    /// aggregated solution.
    pub async fn get_aggregated_solutions(
        &self,
        pool_id: impl Display,
        skill_id: impl Display,
        fields: &[&str],
    ) -> Result<Vec<Value>> {
        let body = AggregationRequest::weighted_dynamic_overlap(pool_id, skill_id, fields);
        let operation_id = self
            .submit_operation(ApiRequest::post(ApiV1::AGGREGATE).json(serde_json::to_value(body)?))
            .await?;
        self.wait_for_operation(&operation_id).await?;
        self.get_all_aggregated_solutions(&operation_id, page_size::AGGREGATED_SOLUTIONS)
            .await
    }
}
