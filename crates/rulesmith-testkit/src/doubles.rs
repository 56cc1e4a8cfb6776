//! Test doubles for the seams other crates mock in their tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use rulesmith_core::RuleRecord;
use rulesmith_generate::{GenerateError, ModelClient};
use rulesmith_store::{HistoryBackend, MemoryBackend, StoreError};

/// A model client that plays back scripted replies in order.
///
/// Each `complete` call consumes the next reply and records the prompt it
/// was given. Running out of replies is an error, so a test that prompts
/// more often than it scripted fails loudly.
pub struct ScriptedModelClient {
    replies: Mutex<VecDeque<Result<String, GenerateError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModelClient {
    /// Script a sequence of successful replies.
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Script a single reply, the common case.
    pub fn once(reply: impl Into<String>) -> Self {
        Self::replying([reply.into()])
    }

    /// Script a failure for the next call.
    pub fn failing(error: GenerateError) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(error)])),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// The prompts seen so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModelClient {
    async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        self.replies
            .lock()
            .expect("reply script poisoned")
            .pop_front()
            .unwrap_or_else(|| panic!("model prompted more times than scripted"))
    }
}

/// A backend that delegates to memory until told to fail saves.
///
/// Loads always succeed. The failure switch is shared, so a test can flip
/// it after the history has been opened.
pub struct FlakyBackend {
    inner: MemoryBackend,
    fail_saves: Arc<AtomicBool>,
    saves: Arc<AtomicUsize>,
}

impl FlakyBackend {
    /// Create a backend and the switch that makes its saves fail.
    pub fn new() -> (Self, Arc<AtomicBool>) {
        let fail_saves = Arc::new(AtomicBool::new(false));
        (
            Self {
                inner: MemoryBackend::new(),
                fail_saves: fail_saves.clone(),
                saves: Arc::new(AtomicUsize::new(0)),
            },
            fail_saves,
        )
    }

    /// Counter of save attempts, including failed ones.
    pub fn save_counter(&self) -> Arc<AtomicUsize> {
        self.saves.clone()
    }
}

#[async_trait]
impl HistoryBackend for FlakyBackend {
    async fn load(&self, collection: &str) -> Result<Vec<RuleRecord>, StoreError> {
        self.inner.load(collection).await
    }

    async fn save(&self, collection: &str, records: &[RuleRecord]) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other(
                "injected save failure",
            )));
        }
        self.inner.save(collection, records).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_client_plays_replies_in_order() {
        let client = ScriptedModelClient::replying(["first", "second"]);
        assert_eq!(client.complete("p1").await.unwrap(), "first");
        assert_eq!(client.complete("p2").await.unwrap(), "second");
        assert_eq!(client.prompts(), ["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_scripted_client_failure() {
        let client = ScriptedModelClient::failing(GenerateError::EmptyReply);
        assert!(matches!(
            client.complete("p").await,
            Err(GenerateError::EmptyReply)
        ));
    }

    #[tokio::test]
    async fn test_flaky_backend_switch() {
        let (backend, fail_saves) = FlakyBackend::new();
        let counter = backend.save_counter();

        backend.save("history", &[]).await.unwrap();

        fail_saves.store(true, Ordering::SeqCst);
        assert!(backend.save("history", &[]).await.is_err());

        fail_saves.store(false, Ordering::SeqCst);
        backend.save("history", &[]).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_flaky_backend_loads_survive_failure_mode() {
        let (backend, fail_saves) = FlakyBackend::new();
        backend.save("history", &[]).await.unwrap();

        fail_saves.store(true, Ordering::SeqCst);
        assert!(backend.load("history").await.unwrap().is_empty());
    }
}
