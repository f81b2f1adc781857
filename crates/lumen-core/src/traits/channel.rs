// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound side of the transport boundary.

use async_trait::async_trait;

use crate::error::LumenError;
use crate::protocol::Envelope;

/// Delivers outbound envelopes to a peer.
///
/// Implementations must preserve call order for a single recipient.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Sends `envelope` to `recipient`.
    async fn send(&self, recipient: &str, envelope: Envelope) -> Result<(), LumenError>;
}
