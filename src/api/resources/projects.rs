//
//  toloka-client
//  api/resources/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Projects API.

use std::fmt::Display;

use serde_json::Value;

use crate::api::common::Query;
use crate::api::endpoints::ApiV1;
use crate::api::{Result, TolokaClient};

impl TolokaClient {
    /// Lists projects.
    pub async fn get_projects(&self, query: Query) -> Result<Value> {
        self.get(ApiV1::PROJECT, query).await
    }

    /// Fetches one project.
    pub async fn get_project(&self, project_id: impl Display, query: Query) -> Result<Value> {
        self.get(&format!("{}/{}", ApiV1::PROJECT, project_id), query)
            .await
    }
}
