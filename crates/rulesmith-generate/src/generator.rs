//! The rule generator: input guard, prompt, decode.

use std::time::Instant;

use crate::client::ModelClient;
use crate::error::{GenerateError, Result};
use crate::parse::parse_reply;
use crate::prompt::build_prompt;
use crate::rule::GeneratedRule;

/// Minimum trimmed request length accepted for generation.
pub const MIN_INPUT_LEN: usize = 3;

/// Turns natural-language requests into structured firewall rules.
///
/// The model behind [`ModelClient`] is treated as an opaque text function.
/// The generator owns everything around it: rejecting requests too short to
/// mean anything, assembling the prompt, and decoding the reply.
pub struct RuleGenerator<C: ModelClient> {
    client: C,
}

impl<C: ModelClient> RuleGenerator<C> {
    /// Create a generator over a model client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Generate a rule from a natural-language request.
    ///
    /// Steps:
    /// 1. Trim the request and reject it below [`MIN_INPUT_LEN`] characters
    /// 2. Prompt the model
    /// 3. Decode the reply into a [`GeneratedRule`]
    ///
    /// A reply that decodes but carries `needs_clarification` is still `Ok`;
    /// asking for clarification is an answer, not a failure.
    pub async fn generate(&self, text: &str) -> Result<GeneratedRule> {
        let text = text.trim();
        if text.chars().count() < MIN_INPUT_LEN {
            return Err(GenerateError::InputTooShort);
        }

        let prompt = build_prompt(text);
        let started = Instant::now();
        let raw = self.client.complete(&prompt).await?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            reply_bytes = raw.len(),
            "model reply received"
        );

        parse_reply(&raw)
    }
}
