//! # Rulesmith Core
//!
//! Pure types for the rulesmith rule history: records, drafts, and the
//! append-boundary validation.
//!
//! This crate contains no I/O, no storage, no networking. It defines the
//! shapes the rest of the workspace moves around.
//!
//! ## Key Types
//!
//! - [`RuleRecord`] - An immutable generated-rule entry in the history
//! - [`RuleDraft`] - The append input, before the store assigns identity
//! - [`RecordId`] - Unique record identifier (v4 UUID)
//!
//! ## Identity
//!
//! Records carry no identity until the history store assigns one at append.
//! The [`RuleDraft`]/[`RuleRecord`] split makes caller-supplied ids and
//! timestamps unrepresentable.

pub mod error;
pub mod record;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use record::{RuleDraft, RuleRecord};
pub use types::RecordId;
pub use validation::validate_draft;
