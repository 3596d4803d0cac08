//
//  toloka-client
//  api/endpoints.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Endpoint path table and platform-level constants.
//!
//! Paths are relative to the environment host (see
//! [`Environment`](crate::config::Environment)) and must be kept verbatim.

use std::time::Duration;

/// Version 1 resource paths.
pub struct ApiV1;

impl ApiV1 {
    pub const ASSIGNMENTS: &'static str = "/api/v1/assignments";
    pub const TASK_SUITES: &'static str = "/api/v1/task-suites";
    pub const POOLS: &'static str = "/api/v1/pools";
    pub const TASKS: &'static str = "/api/v1/tasks";
    pub const MESSAGES: &'static str = "/api/v1/message-threads/compose";
    pub const BONUS: &'static str = "/api/v1/user-bonuses";
    pub const PROJECT: &'static str = "/api/v1/projects";
    pub const WORKERS: &'static str = "/api/new/requester/workers/grid";
    pub const OPERATIONS: &'static str = "/api/v1/operations";
    pub const ANALYTICS: &'static str = "/api/staging/analytics-2";
    pub const AGGREGATE: &'static str = "/api/v1/aggregated-solutions/aggregate-by-pool";
    /// Carries a trailing slash; append the operation id directly.
    pub const AGGREGATED_SOLUTIONS: &'static str = "/api/v1/aggregated-solutions/";
    pub const THREADS: &'static str = "/api/v1/message-threads";
    pub const BALANCE: &'static str = "/api/user/requester/balance";
}

/// Value of the `code` field in a rate-limited response body.
pub const TOO_MANY_REQUESTS: &str = "TOO_MANY_REQUESTS";

/// Default total timeout of a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout used when changing an assignment's status.
pub const ASSIGNMENT_STATUS_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout used when submitting an asynchronous task upload.
pub const BATCH_UPLOAD_TIMEOUT: Duration = Duration::from_secs(20);

/// Default delay between two operation status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Aggregation algorithm requested by
/// [`get_aggregated_solutions`](crate::TolokaClient::get_aggregated_solutions).
pub const WEIGHTED_DYNAMIC_OVERLAP: &str = "WEIGHTED_DYNAMIC_OVERLAP";

/// Analytics field names accepted by the analytics endpoint.
pub mod analytics {
    pub const UNIQUE_SUBMITTERS_COUNT: &str = "unique_submitters_count";
    pub const AVG_SUBMIT_ASSIGNMENT_MILLIS: &str = "avg_submit_assignment_millis";
    pub const REAL_TASKS_COUNT: &str = "real_tasks_count";
}

/// Page sizes used when draining listings.
pub mod page_size {
    pub const POOLS: u32 = 300;
    pub const TASKS: u32 = 1000;
    pub const TASK_SUITES: u32 = 100;
    pub const ASSIGNMENTS: u32 = 1000;
    pub const AGGREGATED_SOLUTIONS: u32 = 500;
    pub const WORKERS: u32 = 100;
}
