//! Backend trait: the abstract interface for history persistence.
//!
//! This trait keeps the history storage-agnostic. Implementations include
//! SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use rulesmith_core::RuleRecord;

use crate::error::Result;

/// The HistoryBackend trait: async load/save for named record collections.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the
/// runtime.
///
/// # Design Notes
///
/// - **Round-trip fidelity**: `load` after `save` reproduces the saved
///   collection exactly, including order and every field.
/// - **Atomic saves**: `save` either replaces the whole collection or leaves
///   the previous durable contents untouched. A failed save must not leave a
///   half-written collection behind.
/// - **Missing collections**: a collection that was never saved loads as an
///   empty vector, not an error.
/// - **No interpretation**: the backend stores what it is given. Identity
///   assignment, ordering decisions, and validation happen above it.
#[async_trait]
pub trait HistoryBackend: Send + Sync {
    /// Load the full contents of `collection`, in insertion order.
    async fn load(&self, collection: &str) -> Result<Vec<RuleRecord>>;

    /// Atomically replace the durable contents of `collection` with `records`.
    async fn save(&self, collection: &str, records: &[RuleRecord]) -> Result<()>;
}
