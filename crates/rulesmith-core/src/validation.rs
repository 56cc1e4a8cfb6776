//! Draft validation: the checks run at the append boundary.

use crate::error::ValidationError;
use crate::record::RuleDraft;

/// Validate a draft before it is accepted for append.
///
/// This performs:
/// - Required-field presence: `user_input` must contain at least one
///   non-whitespace character
///
/// Rule semantics are deliberately not checked here. Whether the expression
/// parses, or whether `json_rule` is well formed, is the generator's and the
/// caller's concern; the store persists what it is given.
pub fn validate_draft(draft: &RuleDraft) -> Result<(), ValidationError> {
    if draft.user_input.trim().is_empty() {
        return Err(ValidationError::MissingUserInput);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_blank_user_input_rejected() {
        for input in ["", " ", "\t", "\n  \n"] {
            let draft = RuleDraft::new(input);
            let result = validate_draft(&draft);
            assert!(matches!(result, Err(ValidationError::MissingUserInput)));
        }
    }

    #[test]
    fn test_populated_draft_accepted() {
        let draft = RuleDraft::new("block bots")
            .expression("cf.client.bot")
            .json_rule(json!({"action": "block"}));
        assert!(validate_draft(&draft).is_ok());
    }

    #[test]
    fn test_empty_expression_is_allowed() {
        // Clarification rules are stored with an empty expression.
        let draft = RuleDraft::new("do something vague");
        assert!(validate_draft(&draft).is_ok());
    }

    proptest! {
        #[test]
        fn prop_any_nonblank_input_validates(input in "\\PC*[a-z0-9]+\\PC*") {
            let draft = RuleDraft::new(input);
            prop_assert!(validate_draft(&draft).is_ok());
        }
    }
}
