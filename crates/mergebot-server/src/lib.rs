//! `mergebot-server` — webhook surface and review pipeline.
//!
//! `build_router` wires the two routes (`POST /webhook`, `GET /health`)
//! around an [`state::AppState`]; `serve` assembles the real collaborators
//! (GitHub client, AI reviewer, Postgres store) and runs the server.

pub mod error;
pub mod github;
pub mod orchestrator;
pub mod reviewer;
pub mod routes;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use mergebot_core::Config;
use openai_agent::OpenAiClient;

use crate::github::GithubClient;
use crate::orchestrator::Orchestrator;
use crate::reviewer::AiReviewer;
use crate::state::AppState;
use crate::store::ReviewStore;

/// Build the axum Router with all routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/webhook", post(routes::webhook::receive))
        .route("/health", get(routes::health::health))
        .layer(cors)
        .with_state(app_state)
}

/// Connect the collaborators described by `config` and run the server until
/// shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let config = Arc::new(config);

    let store = ReviewStore::connect(&config.database_url).await?;
    let github = GithubClient::new(&config);
    let reviewer = AiReviewer::new(
        OpenAiClient::new(config.openai_api_key.clone()),
        config.model.clone(),
        config.temperature,
    );
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::new(github),
        Arc::new(reviewer),
        Arc::new(store),
        config.allowlist.clone(),
    ));

    let app = build_router(AppState::new(config.clone(), orchestrator));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("mergebot listening on http://localhost:{}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Router tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::{HostApi, RecordSink, VerdictSource};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use mergebot_core::{
        signature, Allowlist, ChangedFile, CiState, MergebotError, ReviewRecord, ReviewVerdict,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    const SECRET: &str = "test-webhook-secret";

    /// Host stub that only counts how many cycles touched it.
    #[derive(Default)]
    struct CountingHost {
        files_calls: AtomicUsize,
    }

    #[async_trait]
    impl HostApi for CountingHost {
        async fn list_changed_files(
            &self,
            _pr: u64,
        ) -> Result<Vec<ChangedFile>, MergebotError> {
            self.files_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        async fn fetch_diff(&self, _pr: u64) -> Result<String, MergebotError> {
            Ok(String::new())
        }

        async fn ci_state(&self, _pr: u64) -> Result<CiState, MergebotError> {
            Ok(CiState {
                mergeable: false,
                mergeable_state: Default::default(),
            })
        }

        async fn post_comment(&self, _pr: u64, _body: &str) -> Result<(), MergebotError> {
            Ok(())
        }

        async fn merge(&self, _pr: u64) -> Result<(), MergebotError> {
            Ok(())
        }
    }

    struct StubReviewer;

    #[async_trait]
    impl VerdictSource for StubReviewer {
        async fn review(&self, _diff: &str, _files: &[ChangedFile]) -> ReviewVerdict {
            ReviewVerdict::parse("FAIL: stub")
        }
    }

    struct NullSink;

    #[async_trait]
    impl RecordSink for NullSink {
        async fn append(&self, _record: &ReviewRecord) -> Result<(), MergebotError> {
            Ok(())
        }
    }

    fn test_config() -> Config {
        serde_json::from_value(serde_json::json!({
            "webhook_secret": SECRET,
            "github_token": "t",
            "repo_owner": "orchard9",
            "repo_name": "widgets",
            "openai_api_key": "k",
            "database_url": "postgres://localhost/mergebot",
        }))
        .unwrap()
    }

    fn test_app(host: Arc<CountingHost>) -> Router {
        let orchestrator = Arc::new(Orchestrator::new(
            host,
            Arc::new(StubReviewer),
            Arc::new(NullSink),
            Allowlist::default_paths(),
        ));
        build_router(AppState::new(Arc::new(test_config()), orchestrator))
    }

    fn signed_request(body: &str, event: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .header("x-github-event", event)
            .header("x-hub-signature-256", signature::sign(SECRET, body.as_bytes()))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_pull_request_event_starts_review() {
        let host = Arc::new(CountingHost::default());
        let app = test_app(host.clone());
        let body = r#"{"action":"opened","number":42}"#;

        let response = app.oneshot(signed_request(body, "pull_request")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "PR review started");

        // The cycle runs detached; wait for it to touch the host.
        for _ in 0..100 {
            if host.files_calls.load(Ordering::SeqCst) > 0 {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("spawned review cycle never ran");
    }

    #[tokio::test]
    async fn synchronize_action_starts_review() {
        let host = Arc::new(CountingHost::default());
        let app = test_app(host);
        let body = r#"{"action":"synchronize","number":5}"#;

        let response = app.oneshot(signed_request(body, "pull_request")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "PR review started");
    }

    #[tokio::test]
    async fn invalid_signature_returns_401() {
        let app = test_app(Arc::new(CountingHost::default()));
        let body = r#"{"action":"opened","number":42}"#;
        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("x-github-event", "pull_request")
            .header("x-hub-signature-256", "sha256=deadbeef")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "Invalid signature");
    }

    #[tokio::test]
    async fn missing_signature_returns_401() {
        let app = test_app(Arc::new(CountingHost::default()));
        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("x-github-event", "pull_request")
            .body(Body::from(r#"{"action":"opened","number":42}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_pull_request_event_is_ignored() {
        let host = Arc::new(CountingHost::default());
        let app = test_app(host.clone());
        let body = r#"{"action":"opened","number":42}"#;

        let response = app.oneshot(signed_request(body, "issues")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Event ignored");
        assert_eq!(host.files_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unhandled_action_is_ignored() {
        let host = Arc::new(CountingHost::default());
        let app = test_app(host.clone());
        let body = r#"{"action":"closed","number":42}"#;

        let response = app.oneshot(signed_request(body, "pull_request")).await.unwrap();

        assert_eq!(body_json(response).await["message"], "Event ignored");
        assert_eq!(host.files_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn signed_but_malformed_body_is_ignored() {
        let app = test_app(Arc::new(CountingHost::default()));

        let response = app
            .oneshot(signed_request("not json", "pull_request"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Event ignored");
    }

    #[tokio::test]
    async fn pull_request_event_without_number_is_ignored() {
        let app = test_app(Arc::new(CountingHost::default()));
        let body = r#"{"action":"opened"}"#;

        let response = app.oneshot(signed_request(body, "pull_request")).await.unwrap();
        assert_eq!(body_json(response).await["message"], "Event ignored");
    }

    #[tokio::test]
    async fn health_endpoint_responds_ok() {
        let app = test_app(Arc::new(CountingHost::default()));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert!(json["timestamp"].is_i64());
    }
}
