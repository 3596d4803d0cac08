//
//  toloka-client
//  api/resources/workers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Worker grid.
//!
//! Unlike the other listings the grid is paginated by page number.

use serde_json::Value;

use crate::api::common::{collect_numbered_pages, GridPage, Query};
use crate::api::endpoints::{page_size, ApiV1};
use crate::api::{ApiError, Result, TolokaClient};

impl TolokaClient {
    /// Number of workers matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Protocol`] when the grid omits `totalElements`.
    pub async fn get_workers_count(&self, query: Query) -> Result<u64> {
        let page = GridPage::from_value(self.get(ApiV1::WORKERS, query).await?)?;
        page.total_elements.ok_or_else(|| {
            ApiError::Protocol("worker grid is missing `totalElements`".to_string())
        })
    }

    /// Every worker matching `query`, 100 per page.
    pub async fn get_workers(&self, query: Query) -> Result<Vec<Value>> {
        collect_numbered_pages(page_size::WORKERS, query, |page| {
            self.get(ApiV1::WORKERS, page)
        })
        .await
    }
}
