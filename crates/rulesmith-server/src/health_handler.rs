use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// Liveness probe.
///
/// The listener only binds after the history has loaded its durable
/// contents, so a reachable endpoint also means the store is serving.
pub async fn healthz(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rulesmith::generate::{ModelClient, RuleGenerator};
    use rulesmith::store::MemoryBackend;
    use rulesmith::{Copilot, RuleHistory};
    use rulesmith_testkit::ScriptedModelClient;

    async fn test_state() -> Arc<AppState> {
        let history = RuleHistory::open("history", MemoryBackend::new())
            .await
            .unwrap();
        let client: Box<dyn ModelClient> = Box::new(ScriptedModelClient::replying(Vec::<String>::new()));
        Arc::new(AppState::new(Copilot::new(
            RuleGenerator::new(client),
            history,
        )))
    }

    #[tokio::test]
    async fn healthz_always_returns_ok() {
        let Json(resp) = healthz(State(test_state().await)).await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }
}
