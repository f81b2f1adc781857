// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use lumen_agent::Agent;
use lumen_config::model::GatewayConfig;
use lumen_core::LumenError;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub agent: Arc<Agent>,
    pub auth: AuthConfig,
    /// Process start time for uptime reporting.
    pub started_at: Instant,
}

impl GatewayState {
    pub fn new(agent: Arc<Agent>, config: &GatewayConfig) -> Self {
        Self {
            agent,
            auth: AuthConfig {
                bearer_token: config.bearer_token.clone(),
            },
            started_at: Instant::now(),
        }
    }
}

/// Builds the gateway routes:
/// - GET /health (no auth)
/// - POST /v1/chat (with auth)
/// - POST /v1/generate (with auth)
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/chat", post(handlers::post_chat))
        .route("/v1/generate", post(handlers::post_generate))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// True when `/v1/*` would be served without a bearer token on a
/// non-loopback address.
pub fn exposes_open_api(config: &GatewayConfig) -> bool {
    if config.bearer_token.is_some() {
        return false;
    }
    let host = config.host.trim();
    if host.eq_ignore_ascii_case("localhost") {
        return false;
    }
    match host.trim_matches(['[', ']']).parse::<IpAddr>() {
        Ok(ip) => !ip.is_loopback(),
        Err(_) => true,
    }
}

/// Binds to the configured host:port and serves until `shutdown` is cancelled.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), LumenError> {
    if exposes_open_api(config) {
        tracing::warn!(
            host = config.host.as_str(),
            "gateway.bearer_token is unset and the gateway is not bound to loopback; /v1 routes accept any caller"
        );
    }

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| LumenError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| LumenError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use lumen_config::model::LumenConfig;
    use lumen_test_utils::{MockFetcher, MockGenerator, MockStore};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn state_with(generator: Arc<MockGenerator>, config: LumenConfig) -> GatewayState {
        let store = Arc::new(MockStore::with_storage_url("storage.test"));
        let agent = Agent::new(&config, generator, Arc::new(MockFetcher::new()), store);
        GatewayState::new(Arc::new(agent), &config.gateway)
    }

    fn open_state() -> GatewayState {
        state_with(Arc::new(MockGenerator::new()), LumenConfig::default())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn chat_body(text: &str) -> Value {
        json!({
            "sender": "agent1qpeer",
            "session": "sess-1",
            "message": {
                "kind": "chat_message",
                "timestamp": "2026-01-01T00:00:00Z",
                "msg_id": "6f1c1d8e-8a55-4f8b-9a63-8d6f5e0f4b11",
                "content": [{"type": "text", "text": text}]
            }
        })
    }

    #[tokio::test]
    async fn health_is_public() {
        let mut config = LumenConfig::default();
        config.gateway.bearer_token = Some("secret".into());
        let app = build_router(state_with(Arc::new(MockGenerator::new()), config));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["agent"], "Image Generator Agent");
    }

    #[tokio::test]
    async fn api_routes_require_configured_token() {
        let mut config = LumenConfig::default();
        config.gateway.bearer_token = Some("secret".into());
        let app = build_router(state_with(Arc::new(MockGenerator::new()), config));

        let denied = app
            .clone()
            .oneshot(post_json("/v1/chat", chat_body("hi")))
            .await
            .unwrap();
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

        let mut request = post_json("/v1/chat", chat_body("hi"));
        request
            .headers_mut()
            .insert("authorization", "Bearer secret".parse().unwrap());
        let allowed = app.oneshot(request).await.unwrap();
        assert_eq!(allowed.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn chat_returns_ack_resource_and_end_session() {
        let app = build_router(open_state());

        let response = app
            .oneshot(post_json("/v1/chat", chat_body("a red bicycle")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let replies = body["replies"].as_array().unwrap();
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["kind"], "chat_acknowledgement");
        assert_eq!(
            replies[0]["acknowledged_msg_id"],
            "6f1c1d8e-8a55-4f8b-9a63-8d6f5e0f4b11"
        );
        assert_eq!(replies[1]["content"][0]["type"], "resource");
        assert_eq!(
            replies[1]["content"][0]["resource"]["uri"],
            "agent-storage://storage.test/asset-1"
        );
        assert_eq!(replies[2]["content"][0]["type"], "end-session");
    }

    #[tokio::test]
    async fn generate_maps_outcomes_to_status_codes() {
        let generator = Arc::new(MockGenerator::new());
        generator.push_url("https://img.test/1.png").await;
        generator.push_failure("content policy").await;
        let mut config = LumenConfig::default();
        config.quota.max_requests = 2;
        let app = build_router(state_with(generator, config));

        let body = json!({"sender": "agent1qcaller", "request": {"image_description": "a cat"}});

        let ok = app
            .clone()
            .oneshot(post_json("/v1/generate", body.clone()))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(json_body(ok).await["image_url"], "https://img.test/1.png");

        let failed = app
            .clone()
            .oneshot(post_json("/v1/generate", body.clone()))
            .await
            .unwrap();
        assert_eq!(failed.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            json_body(failed).await["error"],
            "image generation failed: content policy"
        );

        let limited = app
            .oneshot(post_json("/v1/generate", body))
            .await
            .unwrap();
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(limited.headers().contains_key("retry-after"));
        let error = json_body(limited).await;
        assert!(error["error"].as_str().unwrap().contains("rate limit"));
    }

    #[test]
    fn open_api_is_flagged_only_off_loopback() {
        let mut config = LumenConfig::default().gateway;
        assert!(!exposes_open_api(&config));

        for host in ["localhost", "::1", "[::1]", "127.0.0.2"] {
            config.host = host.into();
            assert!(!exposes_open_api(&config), "{host} is loopback");
        }
        for host in ["0.0.0.0", "::", "192.168.1.10", "lumen.internal"] {
            config.host = host.into();
            assert!(exposes_open_api(&config), "{host} is reachable");
        }

        config.bearer_token = Some("secret".into());
        assert!(!exposes_open_api(&config));
    }

    #[tokio::test]
    async fn quota_is_tracked_per_declared_sender() {
        let mut config = LumenConfig::default();
        config.quota.max_requests = 1;
        let app = build_router(state_with(Arc::new(MockGenerator::new()), config));

        let request = |sender: &str| {
            post_json(
                "/v1/generate",
                json!({"sender": sender, "request": {"image_description": "a cat"}}),
            )
        };

        let first = app.clone().oneshot(request("agent1qa")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let repeat = app.clone().oneshot(request("agent1qa")).await.unwrap();
        assert_eq!(repeat.status(), StatusCode::TOO_MANY_REQUESTS);
        // A different declared sender draws from its own window.
        let other = app.oneshot(request("agent1qb")).await.unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_chat_body_is_rejected() {
        let app = build_router(open_state());
        let response = app
            .oneshot(post_json("/v1/chat", json!({"sender": "x"})))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}
