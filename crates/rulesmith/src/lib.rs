//! # Rulesmith
//!
//! The unified API for rulesmith - an AI WAF rule copilot with an ordered,
//! durable rule history.
//!
//! ## Overview
//!
//! Rulesmith turns natural-language requests into Cloudflare-style WAF
//! firewall rules and keeps every generated rule in a persistent history:
//!
//! - **Generation**: A hosted model converts free text into an expression,
//!   a structured rule object, an explanation, and safety warnings
//! - **History**: An append-only-by-default ledger of generated rules,
//!   ordered by arrival, with delete and clear
//! - **Persistence**: Pluggable backends (SQLite, in-memory) behind a
//!   load/save trait
//!
//! ## Key Concepts
//!
//! - **Record**: Immutable once stored. Id and timestamp are assigned by
//!   the store, never by the caller.
//! - **Serialized access**: One worker task owns the collection; commands
//!   apply strictly one at a time, in arrival order.
//! - **Durability before acknowledgment**: A mutation returns `Ok` only
//!   after the backend write succeeded. On failure the in-memory state
//!   rolls back and the operation had no effect.
//! - **Absence is not an error**: A missing id yields `None` or
//!   [`DeleteOutcome::NotFound`], never an `Err`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rulesmith::{Copilot, RuleHistory};
//! use rulesmith::generate::{HttpModelClient, ModelConfig, RuleGenerator};
//! use rulesmith::store::SqliteBackend;
//!
//! async fn example() {
//!     // Open durable storage
//!     let backend = SqliteBackend::open("history.db").unwrap();
//!     let history = RuleHistory::open("history", backend).await.unwrap();
//!
//!     // Wire up generation
//!     let client = HttpModelClient::new(ModelConfig::default()).unwrap();
//!     let copilot = Copilot::new(RuleGenerator::new(client), history);
//!
//!     // Free text in, stored rule out
//!     let reply = copilot
//!         .generate_and_store("block all traffic from Russia to /login")
//!         .await
//!         .unwrap();
//!     println!("{} -> {}", reply.record.id, reply.record.expression);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `rulesmith::core` - Core types (RuleRecord, RuleDraft, RecordId)
//! - `rulesmith::store` - Persistence backends
//! - `rulesmith::generate` - Model-backed rule generation

pub mod copilot;
pub mod error;
pub mod history;

// Re-export component crates
pub use rulesmith_core as core;
pub use rulesmith_generate as generate;
pub use rulesmith_store as store;

// Re-export main types for convenience
pub use copilot::{Copilot, CopilotReply};
pub use error::{CopilotError, HistoryError, Result};
pub use history::{DeleteOutcome, RuleHistory};

// Re-export commonly used core types
pub use rulesmith_core::{RecordId, RuleDraft, RuleRecord};
