//
//  toloka-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Toloka Listing Endpoints
//!
//! Toloka uses two pagination strategies, and this module drains both into a
//! single in-memory vector.
//!
//! # Overview
//!
//! | Type | Endpoints | Strategy |
//! |------|-----------|----------|
//! | [`Page`] | pools, tasks, task suites, assignments, aggregated solutions | Cursor (`id_gt` / `task_id_gt`) |
//! | [`GridPage`] | worker grid | Page number (`page`, `size`) |
//!
//! # Cursor Pagination
//!
//! Listings are requested sorted ascending by the cursor key. Each follow-up
//! request sets the cursor parameter to the key of the last item received, so
//! no item is visited twice. Iteration stops when `has_more` is `false`.
//!
//! A response that lacks `items` or `has_more` is treated as a protocol
//! violation and fails the whole listing.
//!
//! # Example
//!
//! ```rust
//! use toloka_client::api::common::{collect_cursor_pages, Cursor};
//! use toloka_client::Query;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), toloka_client::ApiError> {
//! let items = collect_cursor_pages(Cursor::BY_ID, 2, Query::new(), |query| async move {
//!     Ok(match query.get("id_gt") {
//!         None => json!({"items": [{"id": "1"}, {"id": "2"}], "has_more": true}),
//!         Some(_) => json!({"items": [{"id": "3"}], "has_more": false}),
//!     })
//! })
//! .await?;
//! assert_eq!(items.len(), 3);
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use serde_json::Value;

use super::{ApiError, Query};

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Items of this page, in server order.
    pub items: Vec<Value>,
    /// Whether another page follows.
    pub has_more: bool,
}

impl Page {
    /// Parses a listing response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Protocol`] when `items` is not an array or
    /// `has_more` is not a boolean.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ApiError::Protocol(format!(
                    "listing response is not an object: {}",
                    other
                )))
            }
        };

        let items = match object.remove("items") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ApiError::Protocol(
                    "listing response is missing the `items` array".to_string(),
                ))
            }
        };

        let has_more = object
            .get("has_more")
            .and_then(Value::as_bool)
            .ok_or_else(|| {
                ApiError::Protocol("listing response is missing `has_more`".to_string())
            })?;

        Ok(Self { items, has_more })
    }
}

/// Describes how a listing is sorted and continued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Value of the `sort` parameter.
    pub sort: &'static str,
    /// Query parameter that carries the position of the last item.
    pub param: &'static str,
    /// Item field holding the position.
    pub key: &'static str,
}

impl Cursor {
    /// Cursor over the item `id`.
    pub const BY_ID: Cursor = Cursor {
        sort: "id",
        param: "id_gt",
        key: "id",
    };

    /// Cursor over `task_id`, used by aggregated solutions.
    pub const BY_TASK_ID: Cursor = Cursor {
        sort: "task_id",
        param: "task_id_gt",
        key: "task_id",
    };

    /// Reads the cursor position of `item`.
    fn position_of(&self, item: &Value) -> Result<String, ApiError> {
        match item.get(self.key) {
            Some(Value::String(position)) => Ok(position.clone()),
            Some(Value::Number(position)) => Ok(position.to_string()),
            _ => Err(ApiError::Protocol(format!(
                "listing item has no `{}` to continue from",
                self.key
            ))),
        }
    }
}

/// Drains a cursor-paginated listing.
///
/// The first request carries `sort` and `limit` merged with `base` (entries of
/// `base` win). While a page reports `has_more`, the next request repeats the
/// same query with the cursor parameter set to the last item's position.
///
/// `fetch` receives the full query for each page and returns the raw response.
///
/// # Errors
///
/// Propagates any error from `fetch`. Returns [`ApiError::Protocol`] for a
/// malformed page, for a page that reports `has_more` without items, when
/// the last item lacks the cursor key, or when a page ends at the position
/// the request started from.
pub async fn collect_cursor_pages<F, Fut>(
    cursor: Cursor,
    limit: u32,
    base: Query,
    mut fetch: F,
) -> Result<Vec<Value>, ApiError>
where
    F: FnMut(Query) -> Fut,
    Fut: Future<Output = Result<Value, ApiError>>,
{
    let mut query = Query::new()
        .with("sort", cursor.sort)
        .with("limit", limit)
        .merged(&base);
    let mut collected = Vec::new();

    loop {
        let page = Page::from_value(fetch(query.clone()).await?)?;
        if page.has_more && page.items.is_empty() {
            return Err(ApiError::Protocol(
                "listing reported `has_more` on an empty page".to_string(),
            ));
        }

        collected.extend(page.items);
        tracing::debug!(collected = collected.len(), "Fetched listing page");

        if !page.has_more {
            return Ok(collected);
        }

        // Non-empty: checked above.
        let last = &collected[collected.len() - 1];
        let position = cursor.position_of(last)?;
        if query.get(cursor.param) == Some(position.as_str()) {
            return Err(ApiError::Protocol(format!(
                "listing did not advance past `{}` = {}",
                cursor.param, position
            )));
        }
        query.set(cursor.param, position);
    }
}

/// One page of the worker grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPage {
    /// Workers on this page.
    pub content: Vec<Value>,
    /// Number of pages available.
    pub total_pages: u64,
    /// Number of workers across all pages, when reported.
    pub total_elements: Option<u64>,
}

impl GridPage {
    /// Parses a worker grid response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Protocol`] when `content` or `totalPages` is missing.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        let content = value
            .get("content")
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                ApiError::Protocol("grid response is missing the `content` array".to_string())
            })?;
        let total_pages = value
            .get("totalPages")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                ApiError::Protocol("grid response is missing `totalPages`".to_string())
            })?;

        Ok(Self {
            content,
            total_pages,
            total_elements: value.get("totalElements").and_then(Value::as_u64),
        })
    }
}

/// Drains a page-number paginated grid.
///
/// The first request carries `base` with `size` forced to `page_size`; the
/// remaining pages `1..totalPages` are requested with an explicit `page`.
pub async fn collect_numbered_pages<F, Fut>(
    page_size: u32,
    base: Query,
    mut fetch: F,
) -> Result<Vec<Value>, ApiError>
where
    F: FnMut(Query) -> Fut,
    Fut: Future<Output = Result<Value, ApiError>>,
{
    let mut query = base.with("size", page_size);
    let first = GridPage::from_value(fetch(query.clone()).await?)?;
    let mut collected = first.content;

    for page in 1..first.total_pages {
        query.set("page", page);
        let next = GridPage::from_value(fetch(query.clone()).await?)?;
        collected.extend(next.content);
        tracing::debug!(page, collected = collected.len(), "Fetched grid page");
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn item(id: u64) -> Value {
        json!({"id": id.to_string(), "payload": id * 10})
    }

    #[tokio::test]
    async fn test_concatenates_pages_in_server_order() {
        let pages = vec![
            json!({"items": [item(1), item(2)], "has_more": true}),
            json!({"items": [item(3), item(4)], "has_more": true}),
            json!({"items": [item(5)], "has_more": false}),
        ];
        let seen = Mutex::new(Vec::new());

        let items = collect_cursor_pages(Cursor::BY_ID, 2, Query::new(), |query| {
            let mut seen = seen.lock().unwrap();
            let page = pages[seen.len()].clone();
            seen.push(query);
            async move { Ok(page) }
        })
        .await
        .unwrap();

        let ids: Vec<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].get("id_gt"), None);
        assert_eq!(seen[0].get("sort"), Some("id"));
        assert_eq!(seen[0].get("limit"), Some("2"));
        assert_eq!(seen[1].get("id_gt"), Some("2"));
        assert_eq!(seen[2].get("id_gt"), Some("4"));
    }

    #[tokio::test]
    async fn test_empty_listing_is_one_request() {
        let calls = Mutex::new(0);
        let items = collect_cursor_pages(Cursor::BY_ID, 100, Query::new(), |_| {
            *calls.lock().unwrap() += 1;
            async { Ok(json!({"items": [], "has_more": false})) }
        })
        .await
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_items_is_protocol_error() {
        let result = collect_cursor_pages(Cursor::BY_ID, 100, Query::new(), |_| async {
            Ok(json!({"has_more": false}))
        })
        .await;

        assert!(matches!(result, Err(ApiError::Protocol(_))));
    }

    #[tokio::test]
    async fn test_missing_has_more_is_protocol_error() {
        let result = collect_cursor_pages(Cursor::BY_ID, 100, Query::new(), |_| async {
            Ok(json!({"items": [item(1)]}))
        })
        .await;

        match result {
            Err(ApiError::Protocol(message)) => assert!(message.contains("has_more")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_last_item_without_cursor_key_is_protocol_error() {
        let calls = Mutex::new(0);
        let result = collect_cursor_pages(Cursor::BY_ID, 100, Query::new(), |_| {
            *calls.lock().unwrap() += 1;
            async { Ok(json!({"items": [item(1), {"name": "no id"}], "has_more": true})) }
        })
        .await;

        match result {
            Err(ApiError::Protocol(message)) => assert!(message.contains("`id`")),
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_repeated_last_position_is_protocol_error() {
        let calls = Mutex::new(0);
        let result = collect_cursor_pages(Cursor::BY_ID, 1, Query::new(), |_| {
            *calls.lock().unwrap() += 1;
            async { Ok(json!({"items": [{"id": "1"}], "has_more": true})) }
        })
        .await;

        assert!(matches!(result, Err(ApiError::Protocol(_))));
        assert_eq!(*calls.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_has_more_on_empty_page_is_protocol_error() {
        let result = collect_cursor_pages(Cursor::BY_ID, 100, Query::new(), |_| async {
            Ok(json!({"items": [], "has_more": true}))
        })
        .await;

        assert!(matches!(result, Err(ApiError::Protocol(_))));
    }

    #[tokio::test]
    async fn test_task_id_cursor_and_base_override() {
        let seen = Mutex::new(Vec::new());
        let base = Query::new().with("limit", 1).with("pool_id", 9);

        let items = collect_cursor_pages(Cursor::BY_TASK_ID, 500, base, |query| {
            let mut seen = seen.lock().unwrap();
            let page = if seen.is_empty() {
                json!({"items": [{"task_id": 17}], "has_more": true})
            } else {
                json!({"items": [{"task_id": 18}], "has_more": false})
            };
            seen.push(query);
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(items.len(), 2);
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen[0].get("sort"), Some("task_id"));
        assert_eq!(seen[0].get("limit"), Some("1"));
        assert_eq!(seen[0].get("pool_id"), Some("9"));
        assert_eq!(seen[1].get("task_id_gt"), Some("17"));
    }

    #[tokio::test]
    async fn test_numbered_pages_walk_total_pages() {
        let seen = Mutex::new(Vec::new());
        let workers = collect_numbered_pages(100, Query::new().with("size", 5), |query| {
            let page = query.get("page").unwrap_or("0").parse::<u64>().unwrap();
            seen.lock().unwrap().push(query);
            async move {
                Ok(json!({
                    "content": [{"uid": format!("w{}", page)}],
                    "totalPages": 3,
                    "totalElements": 3
                }))
            }
        })
        .await
        .unwrap();

        assert_eq!(workers.len(), 3);
        assert_eq!(workers[2]["uid"], "w2");
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|q| q.get("size") == Some("100")));
    }

    #[test]
    fn test_grid_page_requires_total_pages() {
        let result = GridPage::from_value(json!({"content": []}));
        assert!(matches!(result, Err(ApiError::Protocol(_))));
    }
}
