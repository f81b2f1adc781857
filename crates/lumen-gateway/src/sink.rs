// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request reply collection.

use async_trait::async_trait;
use tokio::sync::Mutex;

use lumen_core::protocol::Envelope;
use lumen_core::traits::ReplySink;
use lumen_core::LumenError;

/// Buffers the envelopes produced while serving one HTTP request.
///
/// Every reply the agent emits for a request is addressed to that request's
/// sender, so the recipient is only checked, not stored.
pub struct CollectingSink {
    sender: String,
    replies: Mutex<Vec<Envelope>>,
}

impl CollectingSink {
    pub fn new(sender: &str) -> Self {
        Self {
            sender: sender.to_string(),
            replies: Mutex::new(Vec::new()),
        }
    }

    /// Consumes the sink, returning replies in emission order.
    pub fn into_replies(self) -> Vec<Envelope> {
        self.replies.into_inner()
    }
}

#[async_trait]
impl ReplySink for CollectingSink {
    async fn send(&self, recipient: &str, envelope: Envelope) -> Result<(), LumenError> {
        if recipient != self.sender {
            return Err(LumenError::Channel {
                message: format!("cannot deliver to {recipient} over a request from {}", self.sender),
                source: None,
            });
        }
        self.replies.lock().await.push(envelope);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::protocol::ChatMessage;

    #[tokio::test]
    async fn collects_replies_for_the_requesting_sender() {
        let sink = CollectingSink::new("peer");
        sink.send("peer", Envelope::ChatMessage(ChatMessage::end_session()))
            .await
            .unwrap();
        assert!(sink
            .send("someone-else", Envelope::ChatMessage(ChatMessage::end_session()))
            .await
            .is_err());
        assert_eq!(sink.into_replies().len(), 1);
    }
}
