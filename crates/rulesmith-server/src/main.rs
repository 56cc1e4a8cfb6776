//! The rulesmith HTTP server.
//!
//! Wires the pieces together: configuration, logging, the durable rule
//! history, the model-backed generator, and the Axum API on top.

#![forbid(unsafe_code)]

mod cli;
mod config;
mod error;
mod generate_handler;
mod health_handler;
mod history_handler;
mod logging;
mod router;
mod server;
mod shutdown;
mod state;

use std::sync::Arc;

use anyhow::Context;
use rulesmith::generate::{HttpModelClient, ModelClient, RuleGenerator};
use rulesmith::store::{MemoryBackend, SqliteBackend};
use rulesmith::{Copilot, RuleHistory};

use crate::config::{HistoryBackendKind, ServerConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    cli.apply_to(&mut config);

    logging::init_logging(config.log.level, config.log.format);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = config.history.backend.as_str(),
        "starting rulesmith server"
    );

    // The history loads its durable contents here, before the listener
    // binds, so no request can observe a partially loaded collection.
    let history = open_history(&config).await?;

    if config.model.base_url.is_empty() {
        tracing::warn!("model.base_url is not configured; generation requests will fail");
    }
    let client: Box<dyn ModelClient> = Box::new(
        HttpModelClient::new(config.model_config()).context("failed to build model client")?,
    );
    let copilot = Copilot::new(RuleGenerator::new(client), history);

    let state = Arc::new(AppState::new(copilot));
    server::run_http_server(
        state,
        &config.http.bind_address,
        config.http.port,
        shutdown::shutdown_signal(),
    )
    .await
}

async fn open_history(config: &ServerConfig) -> anyhow::Result<RuleHistory> {
    let collection = config.history.collection.as_str();
    let history = match config.history.backend {
        HistoryBackendKind::Memory => RuleHistory::open(collection, MemoryBackend::new()).await?,
        HistoryBackendKind::Sqlite => {
            let backend = SqliteBackend::open(&config.history.path).with_context(|| {
                format!("failed to open database at {}", config.history.path.display())
            })?;
            RuleHistory::open(collection, backend).await?
        }
    };
    Ok(history)
}
