//! vigil-api — the inbound gossip-serving surface.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/gossip?callback=<url>` | Current directory as a [`GossipPayload`]; a present callback self-registers the caller |
//! | GET | `/healthz` | Liveness |
//!
//! Handlers never mutate shared state: the optional `callback` parameter is
//! funneled through the coordinator mailbox via [`AgentHandle`], the same
//! serialized-application point every other mutation goes through.
//!
//! [`GossipPayload`]: vigil_gossip::GossipPayload
//! [`AgentHandle`]: vigil_agent::AgentHandle

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::debug;

use vigil_agent::AgentHandle;
use vigil_gossip::GossipPayload;

/// Query parameters for the gossip endpoint.
#[derive(Debug, Deserialize)]
struct GossipQuery {
    /// The caller's own callback URL, if it wants to be registered.
    callback: Option<String>,
}

/// Build the agent's HTTP router.
pub fn build_router(handle: AgentHandle) -> Router {
    Router::new()
        .route("/gossip", get(serve_gossip))
        .route("/healthz", get(healthz))
        .with_state(handle)
}

/// GET /gossip — serve the directory snapshot, registering the caller's
/// callback first so the response already reflects it.
async fn serve_gossip(
    State(handle): State<AgentHandle>,
    Query(query): Query<GossipQuery>,
) -> Json<GossipPayload> {
    if let Some(callback) = query.callback.filter(|c| !c.is_empty()) {
        debug!(peer = %callback, "inbound self-registration");
        handle.register_peer(&callback).await;
    }

    Json(handle.snapshot().await)
}

/// GET /healthz
async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tokio::sync::watch;
    use tower::ServiceExt;

    use vigil_agent::{AgentConfig, Coordinator};

    use super::*;

    fn spawn_agent() -> (AgentHandle, watch::Sender<bool>) {
        let config = AgentConfig {
            callback: "http://10.0.0.1:9999".to_string(),
            alert_threshold: 3,
            probe_interval: Duration::from_secs(3600),
            gossip_interval: Duration::from_secs(3600),
            probe_timeout: Duration::from_secs(1),
            latency_budget: Duration::from_secs(1),
            seed_targets: vec!["http://svc-a.example/".to_string()],
            seed_peers: vec![],
        };
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (handle, _task) = Coordinator::spawn(config, shutdown_rx);
        (handle, shutdown_tx)
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn gossip_serves_snapshot() {
        let (handle, _shutdown) = spawn_agent();
        let router = build_router(handle);

        let (status, body) = get(router, "/gossip").await;
        assert_eq!(status, StatusCode::OK);

        let payload: GossipPayload = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.targets, vec!["http://svc-a.example/"]);
        assert!(payload.peers.is_empty());
    }

    #[tokio::test]
    async fn gossip_registers_callback() {
        let (handle, _shutdown) = spawn_agent();
        let router = build_router(handle.clone());

        let (status, body) =
            get(router, "/gossip?callback=http://10.0.0.2:9999").await;
        assert_eq!(status, StatusCode::OK);

        // The response already reflects the registration.
        let payload: GossipPayload = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.peers, vec!["http://10.0.0.2:9999"]);

        let snapshot = handle.snapshot().await;
        assert_eq!(snapshot.peers, vec!["http://10.0.0.2:9999"]);
    }

    #[tokio::test]
    async fn gossip_ignores_empty_callback() {
        let (handle, _shutdown) = spawn_agent();
        let router = build_router(handle.clone());

        let (status, _) = get(router, "/gossip?callback=").await;
        assert_eq!(status, StatusCode::OK);
        assert!(handle.snapshot().await.peers.is_empty());
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let (handle, _shutdown) = spawn_agent();
        let router = build_router(handle);

        let (status, body) = get(router, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }
}
