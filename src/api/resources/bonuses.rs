//
//  toloka-client
//  api/resources/bonuses.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bonuses API.
//!
//! [`TolokaClient::send_bonus_users`] grants a bonus per occurrence of a worker
//! in a list: a worker listed three times receives three unit bonuses in a
//! single grant. All grants go out as one asynchronous batch.
//!
//! # Example
//!
//! ```rust,no_run
//! use toloka_client::api::resources::BonusMessage;
//! use toloka_client::TolokaClient;
//!
//! # async fn example(client: TolokaClient) -> Result<(), toloka_client::ApiError> {
//! let workers = vec!["w1".to_string(), "w1".to_string(), "w2".to_string()];
//! let message = BonusMessage::new("Bonus", "Thanks for the careful work")
//!     .with_language("EN");
//!
//! if !client.send_bonus_users(&workers, 0.5, &message, "accepted").await? {
//!     eprintln!("bonus operation failed");
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::api::common::Query;
use crate::api::endpoints::ApiV1;
use crate::api::transport::ApiRequest;
use crate::api::{Result, TolokaClient};

/// Language used for bonus titles and messages unless overridden.
pub const DEFAULT_BONUS_LANGUAGE: &str = "RU";

/// Worker-visible title and text of a bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusMessage {
    pub title: String,
    pub body: String,
    /// Language key of the localized title and message.
    pub language: String,
}

impl BonusMessage {
    /// Creates a message in the default `RU` language.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            language: DEFAULT_BONUS_LANGUAGE.to_string(),
        }
    }

    /// Sets the language key, e.g. `EN`.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Counts occurrences of each worker, in order of first appearance.
///
/// # Example
///
/// ```rust
/// use toloka_client::api::resources::tally_recipients;
///
/// let tally = tally_recipients(&["w2", "w1", "w2"]);
/// assert_eq!(tally, vec![("w2".to_string(), 2), ("w1".to_string(), 1)]);
/// ```
pub fn tally_recipients<S: AsRef<str>>(user_ids: &[S]) -> Vec<(String, u32)> {
    let mut tally: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for user_id in user_ids {
        let user_id = user_id.as_ref();
        match index.get(user_id) {
            Some(&position) => tally[position].1 += 1,
            None => {
                index.insert(user_id, tally.len());
                tally.push((user_id.to_string(), 1));
            }
        }
    }
    tally
}

/// Rounds to two decimals, ties to even.
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round_ties_even() / 100.0
}

/// Builds one bonus entry per distinct worker.
fn bonus_entries(
    tally: &[(String, u32)],
    unit_bonus: f64,
    message: &BonusMessage,
    private_comment: &str,
) -> Vec<Value> {
    tally
        .iter()
        .map(|(user_id, count)| {
            json!({
                "user_id": user_id,
                "amount": round_cents(f64::from(*count) * unit_bonus),
                "private_comment": private_comment,
                "public_title": { message.language.as_str(): message.title },
                "public_message": { message.language.as_str(): message.body },
            })
        })
        .collect()
}

impl TolokaClient {
    /// Grants one or more bonuses.
    ///
    /// `bonus` is a single bonus object or a list of them; `query` is
    /// forwarded as is (e.g. `async_mode`).
    pub async fn send_bonus(&self, bonus: Value, query: Query) -> Result<Value> {
        self.send(ApiRequest::post(ApiV1::BONUS).query(query).json(bonus))
            .await
    }

    /// Grants `unit_bonus` per occurrence of each worker in `user_ids` and
    /// waits for the grant.
    ///
    /// Amounts are rounded to two decimals. Returns `false` when the grant
    /// operation ended in `FAIL`, `true` for any other terminal status.
    pub async fn send_bonus_users<S: AsRef<str>>(
        &self,
        user_ids: &[S],
        unit_bonus: f64,
        message: &BonusMessage,
        private_comment: &str,
    ) -> Result<bool> {
        let tally = tally_recipients(user_ids);
        let entries = bonus_entries(&tally, unit_bonus, message, private_comment);
        let total: f64 = entries
            .iter()
            .filter_map(|entry| entry["amount"].as_f64())
            .sum();
        tracing::info!(users = entries.len(), total = round_cents(total), "Sending bonuses");

        let request = ApiRequest::post(ApiV1::BONUS)
            .query(
                Query::new()
                    .with("async_mode", true)
                    .with("skip_invalid_items", true),
            )
            .json(Value::Array(entries));
        let operation_id = self.submit_operation(request).await?;
        self.wait_for_bonus_operation(&operation_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedExecutor;

    #[test]
    fn test_tally_keeps_first_appearance_order() {
        let tally = tally_recipients(&["b", "a", "b", "c", "a", "b"]);
        assert_eq!(
            tally,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
        assert!(tally_recipients::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_amounts_are_rounded_to_cents() {
        let tally = vec![("w".to_string(), 3)];
        let entries = bonus_entries(&tally, 0.1, &BonusMessage::new("t", "b"), "ok");
        assert_eq!(entries[0]["amount"], 0.3);
    }

    #[test]
    fn test_half_cent_amounts_round_to_even() {
        let tally = vec![("w".to_string(), 1)];
        let message = BonusMessage::new("t", "b");
        assert_eq!(bonus_entries(&tally, 0.125, &message, "ok")[0]["amount"], 0.12);
        assert_eq!(bonus_entries(&tally, 0.625, &message, "ok")[0]["amount"], 0.62);
        assert_eq!(bonus_entries(&tally, 0.375, &message, "ok")[0]["amount"], 0.38);
    }

    #[test]
    fn test_tally_counts_many_repeats() {
        let ids: Vec<String> = (0..1000).map(|i| format!("w{}", i % 3)).collect();
        let tally = tally_recipients(&ids);
        assert_eq!(
            tally,
            vec![
                ("w0".to_string(), 334),
                ("w1".to_string(), 333),
                ("w2".to_string(), 333)
            ]
        );
    }

    #[tokio::test]
    async fn test_send_bonus_users_batches_tally() {
        let (client, requests) = ScriptedExecutor::new()
            .respond(json!({"id": "op-b", "status": "PENDING"}))
            .respond(json!({"id": "op-b", "status": "RUNNING"}))
            .respond(json!({"id": "op-b", "status": "SUCCESS"}))
            .into_client();

        let message = BonusMessage::new("Bonus", "Thanks");
        let granted = client
            .send_bonus_users(&["A", "A", "B"], 1.5, &message, "accepted")
            .await
            .unwrap();
        assert!(granted);

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        let submit = &requests[0];
        assert_eq!(submit.path, "/api/v1/user-bonuses");
        assert_eq!(submit.query.get("async_mode"), Some("true"));
        assert_eq!(submit.query.get("skip_invalid_items"), Some("true"));
        assert_eq!(
            submit.body,
            Some(json!([
                {
                    "user_id": "A",
                    "amount": 3.0,
                    "private_comment": "accepted",
                    "public_title": {"RU": "Bonus"},
                    "public_message": {"RU": "Thanks"}
                },
                {
                    "user_id": "B",
                    "amount": 1.5,
                    "private_comment": "accepted",
                    "public_title": {"RU": "Bonus"},
                    "public_message": {"RU": "Thanks"}
                }
            ]))
        );
    }

    #[tokio::test]
    async fn test_failed_grant_returns_false() {
        let (client, _) = ScriptedExecutor::new()
            .respond(json!({"id": "op-b"}))
            .respond(json!({"id": "op-b", "status": "FAIL"}))
            .into_client();

        let message = BonusMessage::new("t", "b").with_language("EN");
        let granted = client
            .send_bonus_users(&["A"], 1.0, &message, "accepted")
            .await
            .unwrap();
        assert!(!granted);
    }
}
