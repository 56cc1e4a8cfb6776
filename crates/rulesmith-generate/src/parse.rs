//! Decoding model replies into [`GeneratedRule`] values.
//!
//! The happy path is a reply that is exactly the requested JSON object.
//! Models drift despite the instructions: code fences, a sentence of prose
//! before the object, or both. The fallback scans for the first balanced
//! JSON object that decodes as a rule before giving up.

use serde_json::Value;

use crate::error::{GenerateError, Result};
use crate::rule::GeneratedRule;

/// Decode a raw model reply.
///
/// Returns [`GenerateError::InvalidReply`] carrying the untouched reply text
/// when no rule object can be recovered.
pub fn parse_reply(raw: &str) -> Result<GeneratedRule> {
    let trimmed = raw.trim();

    // Happy path: the whole reply is the object.
    if let Some(rule) = decode_candidate(trimmed) {
        return Ok(rule);
    }

    if let Some(rule) = scan_for_rule(trimmed) {
        return Ok(rule);
    }

    Err(GenerateError::InvalidReply {
        raw: raw.to_string(),
    })
}

/// Try each balanced `{...}` span in the reply until one decodes as a rule.
fn scan_for_rule(raw: &str) -> Option<GeneratedRule> {
    let mut rest = raw;
    while let Some(start) = rest.find('{') {
        let candidate = &rest[start..];
        if let Some(object) = balanced_object(candidate) {
            if let Some(rule) = decode_candidate(object) {
                return Some(rule);
            }
        }
        rest = &candidate[1..];
    }
    None
}

/// Return the prefix of `raw` that forms one balanced JSON object.
///
/// `raw` must start at a `{`. Tracks string state so braces inside string
/// values do not affect the depth count.
fn balanced_object(raw: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in raw.char_indices() {
        if in_string {
            match c {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => {
                    in_string = false;
                    escaped = false;
                }
                _ => escaped = false,
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&raw[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Decode one candidate span, rejecting text that is valid JSON but not a
/// rule. Unknown fields are ignored during decoding, so without the check an
/// incidental object ("{}", tool metadata) would decode into an all-default
/// rule. A candidate must carry a string "expression" member; the prompt
/// requires one even in clarification replies.
fn decode_candidate(object: &str) -> Option<GeneratedRule> {
    let value: Value = serde_json::from_str(object).ok()?;
    if !value.get("expression").is_some_and(Value::is_string) {
        return None;
    }
    serde_json::from_value(value).ok()
}
