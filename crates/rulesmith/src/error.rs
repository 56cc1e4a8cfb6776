//! Error types for the rulesmith facade.

use rulesmith_core::ValidationError;
use rulesmith_generate::GenerateError;
use rulesmith_store::StoreError;
use thiserror::Error;

/// Errors that can occur during history operations.
///
/// Absence is not represented here: `get_by_id` returns `Option` and
/// `delete_by_id` returns [`crate::DeleteOutcome`], so a missing id is a
/// normal negative result rather than an error.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The draft failed append-boundary validation. Nothing was mutated.
    #[error("invalid draft: {0}")]
    InvalidDraft(#[from] ValidationError),

    /// The durable write did not complete. In-memory state was rolled back
    /// to the last persisted collection; the operation had no effect.
    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),

    /// The history worker is no longer running.
    #[error("history is closed")]
    Closed,
}

/// Errors that can occur in the generate-and-store flow.
#[derive(Debug, Error)]
pub enum CopilotError {
    /// Rule generation failed before anything was persisted.
    #[error("generation failed: {0}")]
    Generate(#[from] GenerateError),

    /// The generated rule could not be appended to the history.
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;
