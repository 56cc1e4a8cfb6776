//! The copilot: rule generation wired to the history.

use rulesmith_core::{RuleDraft, RuleRecord};
use rulesmith_generate::{ModelClient, RuleGenerator};

use crate::error::CopilotError;
use crate::history::RuleHistory;

/// Result of one generate-and-store round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct CopilotReply {
    /// True when the model asked for clarification instead of guessing.
    /// Advisory only; it is not part of the stored record.
    pub needs_clarification: bool,

    /// The stored record, with its assigned id and timestamp.
    pub record: RuleRecord,
}

/// One call from free text to a stored rule.
///
/// Generation happens first and persists nothing; only a decodable reply
/// reaches the history. Clarification replies are stored too, with an empty
/// expression, so the audit trail keeps every request the model answered.
pub struct Copilot<C: ModelClient> {
    generator: RuleGenerator<C>,
    history: RuleHistory,
}

impl<C: ModelClient> Copilot<C> {
    /// Wire a generator to a history.
    pub fn new(generator: RuleGenerator<C>, history: RuleHistory) -> Self {
        Self { generator, history }
    }

    /// Generate a rule from `text` and append it to the history.
    pub async fn generate_and_store(&self, text: &str) -> Result<CopilotReply, CopilotError> {
        let rule = self.generator.generate(text).await?;

        let draft = RuleDraft::new(text.trim())
            .expression(rule.expression)
            .json_rule(rule.json_rule)
            .explanation(rule.explanation)
            .warnings(rule.warnings);
        let record = self.history.append(draft).await?;

        tracing::info!(
            id = %record.id,
            needs_clarification = rule.needs_clarification,
            "rule generated and stored"
        );
        Ok(CopilotReply {
            needs_clarification: rule.needs_clarification,
            record,
        })
    }

    /// The underlying history handle.
    pub fn history(&self) -> &RuleHistory {
        &self.history
    }
}
