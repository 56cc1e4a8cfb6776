//! Error types for the rulesmith core.

use thiserror::Error;

/// Validation errors raised at the append boundary.
///
/// A draft that fails validation is rejected before any state change; the
/// collection is untouched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The draft's `user_input` field is missing or blank.
    #[error("draft is missing required field user_input")]
    MissingUserInput,
}
