//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use serde_json::json;

use rulesmith::{RuleHistory, RuleRecord};
use rulesmith_core::{RecordId, RuleDraft};
use rulesmith_store::MemoryBackend;

/// The model reply for the canonical "block all traffic from Russia to
/// /login" request, shaped exactly as the prompt instructs.
pub const RU_LOGIN_REPLY: &str = r#"{
  "expression": "(ip.geoip.country eq \"RU\" and http.request.uri.path eq \"/login\")",
  "json_rule": {
    "action": "block",
    "expression": "(ip.geoip.country eq \"RU\" and http.request.uri.path eq \"/login\")",
    "description": "Block RU requests to /login"
  },
  "explanation": "Blocks login attempts originating from Russia.",
  "warnings": [],
  "needs_clarification": false
}"#;

/// A clarification reply: empty expression, warning attached, flag set.
pub const CLARIFICATION_REPLY: &str = r#"{
  "expression": "",
  "json_rule": {},
  "explanation": "This rule is too broad and unsafe.",
  "warnings": ["Rule would block ALL traffic. Extremely unsafe."],
  "needs_clarification": true
}"#;

/// A test fixture with a history over fresh in-memory storage.
pub struct TestFixture {
    pub history: RuleHistory,
}

impl TestFixture {
    /// Open a fixture on an empty in-memory collection.
    pub async fn new() -> Self {
        let history = RuleHistory::open("history", MemoryBackend::new())
            .await
            .expect("in-memory open cannot fail");
        Self { history }
    }

    /// Append `count` numbered drafts and return the stored records.
    pub async fn seed(&self, count: usize) -> Vec<RuleRecord> {
        let mut records = Vec::with_capacity(count);
        for i in 0..count {
            let record = self
                .history
                .append(draft(&format!("seeded rule {i}")))
                .await
                .expect("seeding append failed");
            records.push(record);
        }
        records
    }
}

/// Build a draft with realistic fields from a request string.
pub fn draft(input: &str) -> RuleDraft {
    RuleDraft::new(input)
        .expression("cf.client.bot")
        .json_rule(json!({"action": "block", "description": input}))
        .explanation("fixture rule")
}

/// Build a full record with deterministic timestamp offsets.
pub fn record(input: &str, n: i64) -> RuleRecord {
    draft(input).into_record(RecordId::generate(), 1_736_870_400_000 + n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_seeds_in_order() {
        let fixture = TestFixture::new().await;
        let seeded = fixture.seed(3).await;

        let listed = fixture.history.list_all().await.unwrap();
        assert_eq!(listed, seeded);
        assert_eq!(listed[0].user_input, "seeded rule 0");
        assert_eq!(listed[2].user_input, "seeded rule 2");
    }

    #[test]
    fn test_canned_replies_are_valid_json() {
        let ru: serde_json::Value = serde_json::from_str(RU_LOGIN_REPLY).unwrap();
        assert_eq!(ru["json_rule"]["action"], "block");

        let clarification: serde_json::Value =
            serde_json::from_str(CLARIFICATION_REPLY).unwrap();
        assert_eq!(clarification["needs_clarification"], true);
    }

    #[test]
    fn test_record_builder_is_deterministic_in_time() {
        let a = record("input", 5);
        let b = record("input", 5);
        assert_eq!(a.timestamp, b.timestamp);
        assert_ne!(a.id, b.id);
    }
}
