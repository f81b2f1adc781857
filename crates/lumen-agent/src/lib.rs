// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handling for the Lumen image relay agent.
//!
//! The [`Agent`] is the single entry point the transport calls into:
//! - Chat messages are acknowledged and their items routed through the
//!   [`ChatRouter`] to the [`Orchestrator`]
//! - Inbound acknowledgements are logged
//! - Structured requests pass the [`QuotaGuard`] before reaching the
//!   [`StructuredHandler`]

pub mod orchestrator;
pub mod quota;
pub mod router;
pub mod shutdown;
pub mod structured;

pub use orchestrator::{Orchestrator, RelayedAsset};
pub use quota::{QuotaDecision, QuotaGuard};
pub use router::ChatRouter;
pub use structured::StructuredHandler;

use std::sync::Arc;

use lumen_config::model::LumenConfig;
use lumen_core::protocol::{
    ChatAcknowledgement, Envelope, ErrorMessage, ImageRequest, InboundChat, InboundEnvelope,
};
use lumen_core::traits::{AssetStore, ImageFetcher, ImageGenerator, ReplySink};
use lumen_core::LumenError;
use tracing::{debug, info, warn};

/// Dispatches transport input to the chat and structured paths.
pub struct Agent {
    name: String,
    router: ChatRouter,
    structured: StructuredHandler,
    quota: QuotaGuard,
}

impl Agent {
    /// Wires the pipeline from adapters and the loaded configuration.
    pub fn new(
        config: &LumenConfig,
        generator: Arc<dyn ImageGenerator>,
        fetcher: Arc<dyn ImageFetcher>,
        store: Arc<dyn AssetStore>,
    ) -> Self {
        let orchestrator = Arc::new(Orchestrator::new(
            Arc::clone(&generator),
            fetcher,
            store,
            config.agent.error_notice.clone(),
        ));

        info!(
            agent_name = config.agent.name.as_str(),
            window_minutes = config.quota.window_minutes,
            max_requests = config.quota.max_requests,
            "agent initialized"
        );

        Self {
            name: config.agent.name.clone(),
            router: ChatRouter::new(orchestrator),
            structured: StructuredHandler::new(generator),
            quota: QuotaGuard::from_config(&config.quota),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quota(&self) -> &QuotaGuard {
        &self.quota
    }

    /// Handles one chat protocol envelope from the transport.
    pub async fn handle_chat(
        &self,
        envelope: InboundEnvelope,
        sink: &dyn ReplySink,
    ) -> Result<(), LumenError> {
        let InboundEnvelope {
            sender,
            session,
            message,
        } = envelope;

        match message {
            InboundChat::ChatMessage(msg) => {
                debug!(sender = sender.as_str(), msg_id = %msg.msg_id, items = msg.content.len(), "chat message received");
                self.router.handle(&sender, &session, msg, sink).await
            }
            InboundChat::ChatAcknowledgement(ack) => {
                log_acknowledgement(&sender, &ack);
                Ok(())
            }
        }
    }

    /// Handles one structured request, sending exactly one reply to `sender`.
    ///
    /// Returns the reply that was sent, or [`LumenError::RateLimited`] when
    /// the quota rejected the request before the generator was invoked. In
    /// that case an [`ErrorMessage`] has already been sent.
    pub async fn handle_structured(
        &self,
        sender: &str,
        request: &ImageRequest,
        sink: &dyn ReplySink,
    ) -> Result<Envelope, LumenError> {
        if let QuotaDecision::Denied { retry_after } = self.quota.check(sender) {
            let err = LumenError::RateLimited { retry_after };
            warn!(sender, retry_after_secs = retry_after.as_secs(), "structured request rejected by quota");
            let reply = Envelope::ErrorMessage(ErrorMessage {
                error: err.to_string(),
            });
            sink.send(sender, reply).await?;
            return Err(err);
        }

        let reply = self.structured.handle(sender, request).await;
        sink.send(sender, reply.clone()).await?;
        Ok(reply)
    }
}

fn log_acknowledgement(sender: &str, ack: &ChatAcknowledgement) {
    info!(
        sender,
        acknowledged_msg_id = %ack.acknowledged_msg_id,
        "received acknowledgement"
    );
}
