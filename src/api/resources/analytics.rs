//
//  toloka-client
//  api/resources/analytics.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Analytics and balance.
//!
//! Analytics requests are a list of `{subject, subject_id, name}` objects; the
//! `name` values supported by the platform are listed in
//! [`endpoints::analytics`](crate::api::endpoints::analytics).

use serde_json::{json, Value};

use crate::api::common::Query;
use crate::api::endpoints::ApiV1;
use crate::api::{Result, TolokaClient};

/// Builds a pool-level analytics request for each of `names`.
pub fn pool_analytics_request(pool_id: impl ToString, names: &[&str]) -> Value {
    let pool_id = pool_id.to_string();
    Value::Array(
        names
            .iter()
            .map(|name| json!({"subject": "POOL", "subject_id": pool_id, "name": name}))
            .collect(),
    )
}

impl TolokaClient {
    /// Submits an analytics request; the platform answers with an operation.
    pub async fn request_analytics(&self, request: Value) -> Result<Value> {
        self.post(ApiV1::ANALYTICS, Some(request)).await
    }

    /// Fetches the requester's account balance.
    pub async fn get_balance(&self) -> Result<Value> {
        self.get(ApiV1::BALANCE, Query::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints::analytics;
    use crate::api::testing::{routes, ScriptedExecutor};

    #[test]
    fn test_pool_analytics_request_shape() {
        let request = pool_analytics_request(
            15,
            &[analytics::REAL_TASKS_COUNT, analytics::UNIQUE_SUBMITTERS_COUNT],
        );
        assert_eq!(
            request,
            json!([
                {"subject": "POOL", "subject_id": "15", "name": "real_tasks_count"},
                {"subject": "POOL", "subject_id": "15", "name": "unique_submitters_count"}
            ])
        );
    }

    #[tokio::test]
    async fn test_analytics_and_balance_paths() {
        let (client, requests) = ScriptedExecutor::new()
            .respond(json!({"id": "op-a", "status": "PENDING"}))
            .respond(json!({"balance": 12.5, "credit": 0}))
            .into_client();

        client
            .request_analytics(pool_analytics_request(1, &[analytics::AVG_SUBMIT_ASSIGNMENT_MILLIS]))
            .await
            .unwrap();
        let balance = client.get_balance().await.unwrap();
        assert_eq!(balance["balance"], 12.5);

        assert_eq!(
            routes(&requests),
            vec![
                ("POST".to_string(), "/api/staging/analytics-2".to_string()),
                ("GET".to_string(), "/api/user/requester/balance".to_string()),
            ]
        );
    }
}
