// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply sink that captures outbound envelopes for assertion in tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lumen_core::LumenError;
use lumen_core::protocol::{ChatContent, Envelope};
use lumen_core::traits::ReplySink;

/// A [`ReplySink`] that records every `(recipient, envelope)` pair in order.
#[derive(Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<(String, Envelope)>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded sends, in emission order.
    pub async fn sent(&self) -> Vec<(String, Envelope)> {
        self.sent.lock().await.clone()
    }

    /// Recorded envelopes without their recipients.
    pub async fn envelopes(&self) -> Vec<Envelope> {
        self.sent
            .lock()
            .await
            .iter()
            .map(|(_, env)| env.clone())
            .collect()
    }

    /// Content items of every recorded chat message, flattened in order.
    ///
    /// Acknowledgements and structured replies are skipped.
    pub async fn chat_items(&self) -> Vec<ChatContent> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|(_, env)| env.as_chat_message())
            .flat_map(|msg| msg.content.iter().cloned())
            .collect()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send(&self, recipient: &str, envelope: Envelope) -> Result<(), LumenError> {
        self.sent
            .lock()
            .await
            .push((recipient.to_string(), envelope));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::protocol::{ChatMessage, ErrorMessage};

    #[tokio::test]
    async fn records_sends_in_order() {
        let sink = RecordingSink::new();
        sink.send("peer", Envelope::ChatMessage(ChatMessage::text("hi")))
            .await
            .unwrap();
        sink.send(
            "peer",
            Envelope::ErrorMessage(ErrorMessage {
                error: "boom".into(),
            }),
        )
        .await
        .unwrap();

        let sent = sink.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "peer");
        assert_eq!(
            sink.chat_items().await,
            vec![ChatContent::Text { text: "hi".into() }]
        );
    }
}
