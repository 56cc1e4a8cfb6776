//! In-memory implementation of the HistoryBackend trait.
//!
//! Used for tests and for running without a database file. Same semantics as
//! SQLite but nothing survives a drop.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use rulesmith_core::RuleRecord;

use crate::error::{Result, StoreError};
use crate::traits::HistoryBackend;

/// In-memory backend implementation.
///
/// All data is lost when the backend is dropped. Thread-safe via RwLock.
pub struct MemoryBackend {
    inner: RwLock<MemoryBackendInner>,
}

struct MemoryBackendInner {
    /// Collections indexed by name, each holding records in insertion order.
    collections: HashMap<String, Vec<RuleRecord>>,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryBackendInner {
                collections: HashMap::new(),
            }),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryBackend for MemoryBackend {
    async fn load(&self, collection: &str) -> Result<Vec<RuleRecord>> {
        let inner = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(inner
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, collection: &str, records: &[RuleRecord]) -> Result<()> {
        let mut inner = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        inner
            .collections
            .insert(collection.to_string(), records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulesmith_core::{RecordId, RuleDraft};

    fn make_record(input: &str, position: i64) -> RuleRecord {
        RuleDraft::new(input)
            .expression(format!("expr {position}"))
            .into_record(RecordId::generate(), 1736870400000 + position)
    }

    #[tokio::test]
    async fn test_never_saved_collection_loads_empty() {
        let backend = MemoryBackend::new();
        let records = backend.load("history").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_roundtrip_preserves_order() {
        let backend = MemoryBackend::new();
        let records: Vec<_> = (0..5).map(|i| make_record("input", i)).collect();

        backend.save("history", &records).await.unwrap();
        let loaded = backend.load("history").await.unwrap();
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_contents() {
        let backend = MemoryBackend::new();
        backend
            .save("history", &[make_record("a", 0), make_record("b", 1)])
            .await
            .unwrap();
        backend.save("history", &[make_record("c", 0)]).await.unwrap();

        let loaded = backend.load("history").await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].user_input, "c");
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let backend = MemoryBackend::new();
        backend.save("a", &[make_record("for a", 0)]).await.unwrap();
        backend.save("b", &[make_record("for b", 0)]).await.unwrap();

        let a = backend.load("a").await.unwrap();
        let b = backend.load("b").await.unwrap();
        assert_eq!(a[0].user_input, "for a");
        assert_eq!(b[0].user_input, "for b");
    }
}
