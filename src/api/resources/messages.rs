//
//  toloka-client
//  api/resources/messages.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Message threads API.

use serde_json::Value;

use crate::api::common::Query;
use crate::api::endpoints::ApiV1;
use crate::api::{Result, TolokaClient};

impl TolokaClient {
    /// Composes a message thread to one or more workers.
    pub async fn send_message(&self, message: Value) -> Result<Value> {
        self.post(ApiV1::MESSAGES, Some(message)).await
    }

    /// Lists message threads, e.g. filtered by `folder`.
    pub async fn get_message_threads(&self, query: Query) -> Result<Value> {
        self.get(ApiV1::THREADS, query).await
    }
}
