//! The rule history: a single-writer, serialized-access record ledger.
//!
//! [`RuleHistory`] owns an ordered collection of [`RuleRecord`]s, mirrored
//! between memory and a durable backend. A dedicated worker task applies
//! commands strictly one at a time, so no two operations ever interleave
//! their read-modify-persist sequence; concurrent callers queue rather than
//! race. Mutations persist the full updated collection before the caller is
//! acknowledged, and a failed persistence rolls the in-memory state back to
//! the last durable collection.

use tokio::sync::{mpsc, oneshot};

use rulesmith_core::{validate_draft, RecordId, RuleDraft, RuleRecord};
use rulesmith_store::HistoryBackend;

use crate::error::{HistoryError, Result};

/// Capacity of the command queue. Callers past this depth wait to enqueue.
const COMMAND_QUEUE_DEPTH: usize = 64;

/// Outcome of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record existed and was removed.
    Deleted(RecordId),
    /// No record matched the id; the collection is unchanged.
    NotFound,
}

/// Handle to a named rule history collection.
///
/// Cloning is cheap; all clones talk to the same worker task. Dropping every
/// handle stops the worker after it drains the commands already queued.
#[derive(Clone)]
pub struct RuleHistory {
    commands: mpsc::Sender<Command>,
}

enum Command {
    Append {
        draft: RuleDraft,
        reply: oneshot::Sender<Result<RuleRecord>>,
    },
    ListAll {
        reply: oneshot::Sender<Vec<RuleRecord>>,
    },
    GetById {
        id: RecordId,
        reply: oneshot::Sender<Option<RuleRecord>>,
    },
    DeleteById {
        id: RecordId,
        reply: oneshot::Sender<Result<DeleteOutcome>>,
    },
    ClearAll {
        reply: oneshot::Sender<Result<usize>>,
    },
}

impl RuleHistory {
    /// Open the named collection on `backend`.
    ///
    /// The durable contents are loaded before any command can be submitted;
    /// a collection that was never saved starts empty. The worker task
    /// spawned here owns the in-memory collection for the lifetime of the
    /// handle and its clones.
    pub async fn open<B>(collection: impl Into<String>, backend: B) -> Result<Self>
    where
        B: HistoryBackend + 'static,
    {
        let collection = collection.into();
        let records = backend.load(&collection).await?;
        tracing::info!(
            collection = %collection,
            records = records.len(),
            "rule history loaded"
        );

        let (commands, queue) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let worker = Worker {
            collection,
            backend,
            records,
        };
        tokio::spawn(worker.run(queue));

        Ok(Self { commands })
    }

    /// Append a draft, assigning a fresh unique id and the current instant.
    ///
    /// The record is durable by the time this returns `Ok`. On a
    /// persistence failure the collection is left exactly as it was.
    pub async fn append(&self, draft: RuleDraft) -> Result<RuleRecord> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::Append { draft, reply })
            .await
            .map_err(|_| HistoryError::Closed)?;
        outcome.await.map_err(|_| HistoryError::Closed)?
    }

    /// Return the full collection in insertion order.
    pub async fn list_all(&self) -> Result<Vec<RuleRecord>> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::ListAll { reply })
            .await
            .map_err(|_| HistoryError::Closed)?;
        outcome.await.map_err(|_| HistoryError::Closed)
    }

    /// Look up one record by exact id match.
    pub async fn get_by_id(&self, id: &RecordId) -> Result<Option<RuleRecord>> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::GetById { id: *id, reply })
            .await
            .map_err(|_| HistoryError::Closed)?;
        outcome.await.map_err(|_| HistoryError::Closed)
    }

    /// Remove the record with the given id, if present.
    pub async fn delete_by_id(&self, id: &RecordId) -> Result<DeleteOutcome> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::DeleteById { id: *id, reply })
            .await
            .map_err(|_| HistoryError::Closed)?;
        outcome.await.map_err(|_| HistoryError::Closed)?
    }

    /// Empty the collection. Returns the number of records removed.
    pub async fn clear_all(&self) -> Result<usize> {
        let (reply, outcome) = oneshot::channel();
        self.commands
            .send(Command::ClearAll { reply })
            .await
            .map_err(|_| HistoryError::Closed)?;
        outcome.await.map_err(|_| HistoryError::Closed)?
    }
}

/// The worker task: exclusive owner of the in-memory collection.
struct Worker<B> {
    collection: String,
    backend: B,
    records: Vec<RuleRecord>,
}

impl<B: HistoryBackend> Worker<B> {
    async fn run(mut self, mut queue: mpsc::Receiver<Command>) {
        // One command at a time: the next recv happens only after the
        // current command, including its persistence write, has completed.
        while let Some(command) = queue.recv().await {
            self.handle(command).await;
        }
        tracing::debug!(collection = %self.collection, "history worker stopped");
    }

    async fn handle(&mut self, command: Command) {
        // A dropped reply receiver means the caller went away; the mutation
        // still completes, only the acknowledgment is discarded.
        match command {
            Command::Append { draft, reply } => {
                let _ = reply.send(self.append(draft).await);
            }
            Command::ListAll { reply } => {
                let _ = reply.send(self.records.clone());
            }
            Command::GetById { id, reply } => {
                let record = self.records.iter().find(|r| r.id == id).cloned();
                let _ = reply.send(record);
            }
            Command::DeleteById { id, reply } => {
                let _ = reply.send(self.delete(id).await);
            }
            Command::ClearAll { reply } => {
                let _ = reply.send(self.clear().await);
            }
        }
    }

    async fn append(&mut self, draft: RuleDraft) -> Result<RuleRecord> {
        validate_draft(&draft)?;

        let record = draft.into_record(RecordId::generate(), now_millis());
        self.records.push(record.clone());

        if let Err(e) = self.backend.save(&self.collection, &self.records).await {
            // Roll back to the last persisted collection
            self.records.pop();
            tracing::error!(collection = %self.collection, error = %e, "append not persisted");
            return Err(e.into());
        }

        tracing::debug!(collection = %self.collection, id = %record.id, "record appended");
        Ok(record)
    }

    async fn delete(&mut self, id: RecordId) -> Result<DeleteOutcome> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            return Ok(DeleteOutcome::NotFound);
        };

        let removed = self.records.remove(index);
        if let Err(e) = self.backend.save(&self.collection, &self.records).await {
            // Roll back: restore the record at its original position
            self.records.insert(index, removed);
            tracing::error!(collection = %self.collection, error = %e, "delete not persisted");
            return Err(e.into());
        }

        tracing::debug!(collection = %self.collection, id = %id, "record deleted");
        Ok(DeleteOutcome::Deleted(id))
    }

    async fn clear(&mut self) -> Result<usize> {
        let previous = std::mem::take(&mut self.records);

        if let Err(e) = self.backend.save(&self.collection, &[]).await {
            self.records = previous;
            tracing::error!(collection = %self.collection, error = %e, "clear not persisted");
            return Err(e.into());
        }

        tracing::debug!(
            collection = %self.collection,
            removed = previous.len(),
            "history cleared"
        );
        Ok(previous.len())
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
