//! # Rulesmith Testkit
//!
//! Testing utilities for rulesmith.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Doubles**: Scripted model clients and failure-injecting backends
//! - **Fixtures**: Ready histories, draft builders, and canned model replies
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Doubles
//!
//! Drive a copilot without a model endpoint:
//!
//! ```rust
//! use rulesmith_testkit::doubles::ScriptedModelClient;
//! use rulesmith_testkit::fixtures::RU_LOGIN_REPLY;
//!
//! let client = ScriptedModelClient::once(RU_LOGIN_REPLY);
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use rulesmith_testkit::generators::arb_record;
//!
//! proptest! {
//!     #[test]
//!     fn record_round_trips(record in arb_record()) {
//!         let encoded = serde_json::to_string(&record).unwrap();
//!         prop_assert_eq!(serde_json::from_str::<rulesmith::RuleRecord>(&encoded).unwrap(), record);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust,no_run
//! use rulesmith_testkit::fixtures::TestFixture;
//!
//! async fn example() {
//!     let fixture = TestFixture::new().await;
//!     let seeded = fixture.seed(3).await;
//!     assert_eq!(seeded.len(), 3);
//! }
//! ```

pub mod doubles;
pub mod fixtures;
pub mod generators;

pub use doubles::{FlakyBackend, ScriptedModelClient};
pub use fixtures::{draft, record, TestFixture, CLARIFICATION_REPLY, RU_LOGIN_REPLY};
pub use generators::{arb_draft, arb_record, arb_records};
