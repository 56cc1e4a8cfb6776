//! SQLite implementation of the HistoryBackend trait.
//!
//! This is the primary durable backend for the rule history. It uses rusqlite
//! with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection};

use rulesmith_core::{RecordId, RuleRecord};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::HistoryBackend;

/// SQLite-based backend implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteBackend {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBackend {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(&path)?;
        migration::migrate(&mut conn)?;
        tracing::debug!(path = %path.as_ref().display(), "opened history database");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

// Helper to convert a row to RuleRecord. Column order matches the SELECT in
// `load`.
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<RuleRecord> {
    let id_text: String = row.get("record_id")?;
    let json_rule_text: String = row.get("json_rule")?;
    let warnings_text: String = row.get("warnings")?;

    let id = RecordId::parse(&id_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let json_rule = serde_json::from_str(&json_rule_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let warnings = serde_json::from_str(&warnings_text).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(RuleRecord {
        id,
        timestamp: row.get("timestamp")?,
        user_input: row.get("user_input")?,
        expression: row.get("expression")?,
        json_rule,
        explanation: row.get("explanation")?,
        warnings,
    })
}

#[async_trait]
impl HistoryBackend for SqliteBackend {
    async fn load(&self, collection: &str) -> Result<Vec<RuleRecord>> {
        let collection = collection.to_string();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::Poisoned)?;

            let mut stmt = conn.prepare(
                "SELECT record_id, timestamp, user_input, expression, json_rule,
                        explanation, warnings
                 FROM rule_records WHERE collection = ?1
                 ORDER BY position",
            )?;

            let records = stmt
                .query_map(params![collection], row_to_record)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(records)
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }

    async fn save(&self, collection: &str, records: &[RuleRecord]) -> Result<()> {
        let collection = collection.to_string();
        let records = records.to_vec();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            // Encode JSON columns before opening the transaction
            let mut rows = Vec::with_capacity(records.len());
            for (position, record) in records.iter().enumerate() {
                let json_rule = serde_json::to_string(&record.json_rule)?;
                let warnings = serde_json::to_string(&record.warnings)?;
                rows.push((position as i64, record, json_rule, warnings));
            }

            let mut conn = conn.lock().map_err(|_| StoreError::Poisoned)?;

            // Replace the collection: delete all, then insert current
            let tx = conn.transaction()?;

            tx.execute(
                "DELETE FROM rule_records WHERE collection = ?1",
                params![collection],
            )?;

            for (position, record, json_rule, warnings) in rows {
                tx.execute(
                    "INSERT INTO rule_records (
                        collection, position, record_id, timestamp, user_input,
                        expression, json_rule, explanation, warnings
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        collection,
                        position,
                        record.id.to_string(),
                        record.timestamp,
                        record.user_input,
                        record.expression,
                        json_rule,
                        record.explanation,
                        warnings,
                    ],
                )?;
            }

            tx.commit()?;
            tracing::debug!(collection = %collection, rows = records.len(), "saved collection");
            Ok(())
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }
}
