// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-item dispatch of inbound chat messages.

use std::sync::Arc;

use lumen_core::protocol::{ChatAcknowledgement, ChatContent, ChatMessage, Envelope};
use lumen_core::traits::ReplySink;
use lumen_core::types::SessionId;
use lumen_core::LumenError;
use tracing::{debug, info};

use crate::orchestrator::Orchestrator;

/// Acknowledges inbound chat messages and routes their content items.
pub struct ChatRouter {
    orchestrator: Arc<Orchestrator>,
}

impl ChatRouter {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Processes every item of `message` in order.
    ///
    /// The acknowledgement goes out before any item is looked at; failing to
    /// send it is the only error returned. No deduplication is done on
    /// `msg_id`.
    pub async fn handle(
        &self,
        sender: &str,
        session: &SessionId,
        message: ChatMessage,
        sink: &dyn ReplySink,
    ) -> Result<(), LumenError> {
        let ack = ChatAcknowledgement::for_message(message.msg_id);
        sink.send(sender, Envelope::ChatAcknowledgement(ack)).await?;

        for item in message.content {
            match item {
                ChatContent::StartSession => {
                    info!(sender, session = %session, "session started");
                }
                ChatContent::Text { text } => {
                    info!(sender, session = %session, "image requested");
                    self.orchestrator
                        .handle_prompt(sender, &text, session, sink)
                        .await;
                }
                ChatContent::Resource { resource_id, .. } => {
                    debug!(sender, resource_id = resource_id.as_str(), "ignoring inbound resource");
                }
                ChatContent::EndSession => {
                    info!(sender, session = %session, "session ended by peer");
                }
                ChatContent::Unsupported => {
                    debug!(sender, "ignoring unsupported content item");
                }
            }
        }

        Ok(())
    }
}
