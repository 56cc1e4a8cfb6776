use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::generate_handler::generate_rule;
use crate::health_handler::healthz;
use crate::history_handler::{
    clear_history, delete_history_record, get_history_record, list_history,
};
use crate::state::AppState;

/// Maximum request body size for API endpoints (64 KiB).
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Build the Axum router with all REST API routes.
///
/// `/healthz` stays outside the `/api` group so probes skip the body limit
/// and CORS layers. CORS is permissive: the API carries no credentials and
/// is meant to be callable from a browser UI served elsewhere.
pub fn build_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new().route("/healthz", get(healthz));

    let api_routes = Router::new()
        .route("/api/generate", post(generate_rule))
        .route("/api/history", get(list_history))
        .route("/api/history/clear", post(clear_history))
        .route(
            "/api/history/{id}",
            get(get_history_record).delete(delete_history_record),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(CorsLayer::permissive());

    public_routes.merge(api_routes).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use rulesmith::generate::{ModelClient, RuleGenerator};
    use rulesmith::store::MemoryBackend;
    use rulesmith::{Copilot, RuleHistory};
    use rulesmith_testkit::{ScriptedModelClient, CLARIFICATION_REPLY, RU_LOGIN_REPLY};

    async fn app_with_client(client: ScriptedModelClient) -> Router {
        let history = RuleHistory::open("history", MemoryBackend::new())
            .await
            .unwrap();
        let boxed: Box<dyn ModelClient> = Box::new(client);
        let state = Arc::new(AppState::new(Copilot::new(
            RuleGenerator::new(boxed),
            history,
        )));
        build_router(state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let app = app_with_client(ScriptedModelClient::replying(Vec::<String>::new())).await;

        let response = app.oneshot(get("/healthz")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn generate_stores_and_returns_record() {
        let app = app_with_client(ScriptedModelClient::once(RU_LOGIN_REPLY)).await;

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/generate",
                json!({"text": "block all traffic from Russia to /login"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["input"], "block all traffic from Russia to /login");
        assert_eq!(body["needs_clarification"], false);
        assert!(body["record"]["id"].is_string());
        assert!(body["record"]["expression"]
            .as_str()
            .unwrap()
            .contains("ip.geoip.country"));

        // The record is now visible in the history
        let response = app.oneshot(get("/api/history")).await.unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["id"], body["record"]["id"]);
    }

    #[tokio::test]
    async fn generate_clarification_is_flagged_and_stored() {
        let app = app_with_client(ScriptedModelClient::once(CLARIFICATION_REPLY)).await;

        let response = app
            .clone()
            .oneshot(post_json("/api/generate", json!({"text": "block everything"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["needs_clarification"], true);
        assert_eq!(body["record"]["expression"], "");

        let response = app.oneshot(get("/api/history")).await.unwrap();
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn generate_short_input_is_rejected() {
        let app = app_with_client(ScriptedModelClient::replying(Vec::<String>::new())).await;

        let response = app
            .clone()
            .oneshot(post_json("/api/generate", json!({"text": "no"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_INPUT");

        // Nothing was stored
        let response = app.oneshot(get("/api/history")).await.unwrap();
        assert!(body_json(response).await.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generate_missing_text_is_rejected() {
        let app = app_with_client(ScriptedModelClient::replying(Vec::<String>::new())).await;

        let response = app
            .oneshot(post_json("/api/generate", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn generate_undecodable_reply_returns_raw() {
        let app =
            app_with_client(ScriptedModelClient::once("I cannot help with that.")).await;

        let response = app
            .clone()
            .oneshot(post_json("/api/generate", json!({"text": "block ssh scanners"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "AI returned invalid JSON.");
        assert_eq!(body["raw"], "I cannot help with that.");

        // A reply that never decoded is not stored
        let response = app.oneshot(get("/api/history")).await.unwrap();
        assert!(body_json(response).await.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_list_starts_empty() {
        let app = app_with_client(ScriptedModelClient::replying(Vec::<String>::new())).await;

        let response = app.oneshot(get("/api/history")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn history_get_by_id_round_trip() {
        let app = app_with_client(ScriptedModelClient::once(RU_LOGIN_REPLY)).await;

        let response = app
            .clone()
            .oneshot(post_json("/api/generate", json!({"text": "block RU to /login"})))
            .await
            .unwrap();
        let stored = body_json(response).await;
        let id = stored["record"]["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(get(&format!("/api/history/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, stored["record"]);
    }

    #[tokio::test]
    async fn history_get_unknown_id_is_404() {
        let app = app_with_client(ScriptedModelClient::replying(Vec::<String>::new())).await;

        let response = app
            .oneshot(get("/api/history/550e8400-e29b-41d4-a716-446655440000"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "RECORD_NOT_FOUND");
    }

    #[tokio::test]
    async fn history_get_malformed_id_is_404() {
        let app = app_with_client(ScriptedModelClient::replying(Vec::<String>::new())).await;

        let response = app.oneshot(get("/api/history/not-a-uuid")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn history_delete_removes_record() {
        let app = app_with_client(ScriptedModelClient::once(RU_LOGIN_REPLY)).await;

        let response = app
            .clone()
            .oneshot(post_json("/api/generate", json!({"text": "block RU to /login"})))
            .await
            .unwrap();
        let stored = body_json(response).await;
        let id = stored["record"]["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(delete(&format!("/api/history/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"deleted": id}));

        // A second delete of the same id reports not-found
        let response = app
            .clone()
            .oneshot(delete(&format!("/api/history/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(get("/api/history")).await.unwrap();
        assert!(body_json(response).await.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_clear_empties_collection() {
        let app = app_with_client(ScriptedModelClient::replying([
            RU_LOGIN_REPLY,
            RU_LOGIN_REPLY,
        ]))
        .await;

        for text in ["block RU to /login", "block RU to /login again"] {
            let response = app
                .clone()
                .oneshot(post_json("/api/generate", json!({ "text": text })))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(post_json("/api/history/clear", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"cleared": true, "removed": 2})
        );

        let response = app.oneshot(get("/api/history")).await.unwrap();
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let app = app_with_client(ScriptedModelClient::replying(Vec::<String>::new())).await;

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/generate")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn unknown_api_route_is_404() {
        let app = app_with_client(ScriptedModelClient::replying(Vec::<String>::new())).await;

        let response = app.oneshot(get("/api/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
