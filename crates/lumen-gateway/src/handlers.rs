// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles GET /health, POST /v1/chat, POST /v1/generate.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use lumen_core::LumenError;
use lumen_core::protocol::{Envelope, ErrorMessage, ImageRequest, InboundEnvelope};

use crate::server::GatewayState;
use crate::sink::CollectingSink;

/// Request body for POST /v1/generate.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Address of the calling agent, as declared by the caller.
    ///
    /// The quota is keyed on this value. The gateway's bearer token is shared
    /// by all callers and does not identify one, so any caller holding it can
    /// present a fresh `sender` to get a fresh quota window.
    pub sender: String,
    pub request: ImageRequest,
}

/// Response body for POST /v1/chat.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReplies {
    /// Every envelope the agent emitted, in order.
    pub replies: Vec<Envelope>,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub agent: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        agent: state.agent.name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

/// POST /v1/chat
///
/// Runs one chat envelope through the agent and returns the replies it produced.
pub async fn post_chat(
    State(state): State<GatewayState>,
    Json(envelope): Json<InboundEnvelope>,
) -> Response {
    let sink = CollectingSink::new(&envelope.sender);

    match state.agent.handle_chat(envelope, &sink).await {
        Ok(()) => Json(ChatReplies {
            replies: sink.into_replies(),
        })
        .into_response(),
        Err(err) => {
            tracing::error!(stage = err.stage(), error = %err, "chat envelope handling failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// POST /v1/generate
///
/// 200 with `{image_url}`, 502 with `{error}` when generation fails, 429 with
/// `{error}` and `Retry-After` when the sender's quota is exhausted.
///
/// The quota is charged to the self-declared `sender` in the body, not to an
/// authenticated identity. Deployments that need a per-caller cap must put
/// the gateway behind a proxy that sets `sender` itself.
pub async fn post_generate(
    State(state): State<GatewayState>,
    Json(body): Json<GenerateRequest>,
) -> Response {
    let sink = CollectingSink::new(&body.sender);

    match state
        .agent
        .handle_structured(&body.sender, &body.request, &sink)
        .await
    {
        Ok(Envelope::ImageResponse(response)) => Json(response).into_response(),
        Ok(Envelope::ErrorMessage(error)) => (StatusCode::BAD_GATEWAY, Json(error)).into_response(),
        Ok(other) => {
            tracing::error!(reply = ?other, "unexpected structured reply");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "unexpected reply".into())
        }
        Err(err @ LumenError::RateLimited { retry_after }) => {
            let secs = retry_after.as_secs().max(1).to_string();
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(RETRY_AFTER, secs)],
                Json(ErrorMessage {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorMessage { error })).into_response()
}
