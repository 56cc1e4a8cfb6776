//! Error types for rule generation.

use thiserror::Error;

/// Errors that can occur while generating a rule from natural language.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request text is too short to describe a rule.
    #[error("please enter a valid rule request")]
    InputTooShort,

    /// The model endpoint could not be reached.
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The model endpoint answered with a non-success status.
    #[error("model endpoint returned status {status}: {body}")]
    Endpoint { status: u16, body: String },

    /// The model answered but the reply envelope carried no text.
    #[error("model returned an empty reply")]
    EmptyReply,

    /// The model reply text did not contain a decodable rule object.
    ///
    /// Carries the raw reply so callers can surface it for debugging.
    #[error("AI returned invalid JSON")]
    InvalidReply { raw: String },
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
