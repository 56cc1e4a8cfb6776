//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::json;

use rulesmith_core::{RecordId, RuleDraft, RuleRecord};

/// Generate a random RecordId, deterministic from the proptest seed.
pub fn record_id() -> impl Strategy<Value = RecordId> {
    any::<u128>().prop_map(|n| RecordId::from_uuid(uuid::Uuid::from_u128(n)))
}

/// Generate a reasonable millisecond timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=1_900_000_000_000i64
}

/// Generate request text that passes draft validation.
pub fn user_input() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ./-]{2,60}".prop_map(String::from)
}

/// Generate a firewall expression, sometimes empty like a clarification
/// outcome.
pub fn expression() -> impl Strategy<Value = String> {
    prop_oneof![
        2 => "[a-z._ ]{1,40}\"[A-Z]{2}\"".prop_map(String::from),
        2 => Just("cf.client.bot".to_string()),
        1 => Just(String::new()),
    ]
}

/// Generate a warning list.
pub fn warnings() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z0-9 .]{1,40}", 0..3)
}

/// Generate a complete draft.
pub fn arb_draft() -> impl Strategy<Value = RuleDraft> {
    (user_input(), expression(), "[a-z]{1,10}", warnings()).prop_map(
        |(input, expr, action, warnings)| {
            RuleDraft::new(input)
                .expression(expr)
                .json_rule(json!({ "action": action }))
                .explanation("generated for property tests")
                .warnings(warnings)
        },
    )
}

/// Generate a complete record with store-assigned fields filled in.
pub fn arb_record() -> impl Strategy<Value = RuleRecord> {
    (arb_draft(), record_id(), timestamp())
        .prop_map(|(draft, id, ts)| draft.into_record(id, ts))
}

/// Generate an ordered collection of records.
pub fn arb_records(max: usize) -> impl Strategy<Value = Vec<RuleRecord>> {
    prop::collection::vec(arb_record(), 0..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulesmith_core::validate_draft;

    proptest! {
        #[test]
        fn test_generated_drafts_validate(draft in arb_draft()) {
            prop_assert!(validate_draft(&draft).is_ok());
        }

        #[test]
        fn test_generated_records_round_trip_json(record in arb_record()) {
            let encoded = serde_json::to_string(&record).unwrap();
            let decoded: RuleRecord = serde_json::from_str(&encoded).unwrap();
            prop_assert_eq!(decoded, record);
        }

        #[test]
        fn test_generated_ids_are_unique(records in arb_records(8)) {
            let mut seen = std::collections::HashSet::new();
            for record in &records {
                prop_assert!(seen.insert(record.id));
            }
        }
    }
}
