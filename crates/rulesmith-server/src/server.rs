use std::future::Future;
use std::sync::Arc;

use crate::router::build_router;
use crate::state::AppState;

/// Run the REST API HTTP server on the given bind address and port.
///
/// The server shuts down gracefully when `shutdown` resolves, draining
/// in-flight connections before returning.
pub async fn run_http_server(
    state: Arc<AppState>,
    bind_address: &str,
    port: u16,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(format!("{bind_address}:{port}")).await?;

    tracing::info!(%bind_address, port, "HTTP API server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
