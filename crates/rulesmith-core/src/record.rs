//! Rule records: the single entity the history store persists.
//!
//! A record is immutable once stored. There is no update operation; records
//! are created by append and destroyed by delete or clear.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::RecordId;

/// A generated firewall rule, as stored in the history collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Unique identifier, assigned by the store at append. Never reused.
    pub id: RecordId,

    /// Creation instant (Unix milliseconds), assigned by the store at append.
    pub timestamp: i64,

    /// The original free-text request the rule was generated from.
    pub user_input: String,

    /// The generated firewall expression. May be empty when generation
    /// needed clarification.
    pub expression: String,

    /// Structured rule object (action, expression, description). Stored
    /// opaquely; the store does not validate its shape.
    pub json_rule: Value,

    /// Human-readable rationale for the rule.
    pub explanation: String,

    /// Caveats the generator attached to the rule.
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// The append input: a rule record before the store assigns identity.
///
/// Carries every [`RuleRecord`] field except `id` and `timestamp`, which
/// only the store may assign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDraft {
    /// The original free-text request.
    pub user_input: String,

    /// The generated firewall expression.
    pub expression: String,

    /// Structured rule object, treated opaquely.
    #[serde(default)]
    pub json_rule: Value,

    /// Human-readable rationale.
    #[serde(default)]
    pub explanation: String,

    /// Caveats attached by the generator.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl RuleDraft {
    /// Start a draft from the user's request text.
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            expression: String::new(),
            json_rule: Value::Null,
            explanation: String::new(),
            warnings: Vec::new(),
        }
    }

    /// Set the generated expression.
    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = expression.into();
        self
    }

    /// Set the structured rule object.
    pub fn json_rule(mut self, json_rule: Value) -> Self {
        self.json_rule = json_rule;
        self
    }

    /// Set the explanation.
    pub fn explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Set the warnings list.
    pub fn warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Promote the draft to a stored record with the given identity.
    ///
    /// Only the history store calls this; `id` and `timestamp` are assigned
    /// there, under its serialization guard.
    pub fn into_record(self, id: RecordId, timestamp: i64) -> RuleRecord {
        RuleRecord {
            id,
            timestamp,
            user_input: self.user_input,
            expression: self.expression,
            json_rule: self.json_rule,
            explanation: self.explanation,
            warnings: self.warnings,
        }
    }
}
