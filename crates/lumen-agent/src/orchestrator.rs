// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat-path request lifecycle: generate, fetch, store, grant, reply.
//!
//! Every prompt ends in exactly one terminal outcome. On success the sender
//! receives a resource reference followed by an end-session message. On any
//! failure the sender receives the configured error notice and nothing else.

use std::sync::Arc;

use lumen_core::protocol::{ChatMessage, Envelope};
use lumen_core::traits::{AssetStore, ImageFetcher, ImageGenerator, ReplySink};
use lumen_core::types::{AssetId, SessionId, asset_uri};
use lumen_core::LumenError;
use tracing::{debug, error, info, warn};

/// A stored and shared image, ready to be referenced in a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedAsset {
    pub asset_id: AssetId,
    pub uri: String,
    pub mime_type: String,
}

/// Drives one text prompt through the external collaborators.
pub struct Orchestrator {
    generator: Arc<dyn ImageGenerator>,
    fetcher: Arc<dyn ImageFetcher>,
    store: Arc<dyn AssetStore>,
    error_notice: String,
}

impl Orchestrator {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        fetcher: Arc<dyn ImageFetcher>,
        store: Arc<dyn AssetStore>,
        error_notice: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            fetcher,
            store,
            error_notice: error_notice.into(),
        }
    }

    /// The generator shared with the structured path.
    pub fn generator(&self) -> Arc<dyn ImageGenerator> {
        Arc::clone(&self.generator)
    }

    /// Handles one prompt from `sender` and sends the outcome through `sink`.
    ///
    /// Never fails: pipeline errors are logged and answered with the error
    /// notice, and reply delivery errors are logged.
    pub async fn handle_prompt(
        &self,
        sender: &str,
        prompt: &str,
        session: &SessionId,
        sink: &dyn ReplySink,
    ) {
        match self.relay(sender, prompt, session).await {
            Ok(asset) => {
                info!(
                    sender,
                    session = %session,
                    asset_id = %asset.asset_id,
                    mime_type = asset.mime_type.as_str(),
                    "image relayed to sender"
                );
                self.emit_success(sender, session, asset, sink).await;
            }
            Err(err) => {
                error!(
                    sender,
                    session = %session,
                    stage = err.stage(),
                    error = %err,
                    "image relay failed"
                );
                let notice = Envelope::ChatMessage(ChatMessage::text(self.error_notice.clone()));
                if let Err(send_err) = sink.send(sender, notice).await {
                    warn!(sender, error = %send_err, "failed to deliver error notice");
                }
            }
        }
    }

    /// Runs generate -> fetch -> create -> grant without emitting anything.
    pub async fn relay(
        &self,
        sender: &str,
        prompt: &str,
        session: &SessionId,
    ) -> Result<RelayedAsset, LumenError> {
        let url = self.generator.generate(prompt).await?;
        debug!(sender, session = %session, "image generated");

        let image = self.fetcher.fetch(&url).await?;
        let mime_type = image.mime_type().to_string();

        let asset_id = self
            .store
            .create_asset(&session.0, image.bytes, &mime_type)
            .await?;
        debug!(asset_id = %asset_id, "asset created");

        self.store.set_permissions(&asset_id, sender).await?;

        let uri = asset_uri(self.store.storage_url(), &asset_id);
        Ok(RelayedAsset {
            asset_id,
            uri,
            mime_type,
        })
    }

    async fn emit_success(
        &self,
        sender: &str,
        session: &SessionId,
        asset: RelayedAsset,
        sink: &dyn ReplySink,
    ) {
        let resource = ChatMessage::resource(asset.asset_id.0, asset.uri, asset.mime_type);
        let replies = [
            Envelope::ChatMessage(resource),
            Envelope::ChatMessage(ChatMessage::end_session()),
        ];
        for reply in replies {
            if let Err(err) = sink.send(sender, reply).await {
                // The asset is already shared; an error notice now would contradict it.
                warn!(
                    sender,
                    session = %session,
                    stage = err.stage(),
                    error = %err,
                    "failed to deliver reply"
                );
                return;
            }
        }
    }
}
