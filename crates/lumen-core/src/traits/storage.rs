// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asset storage adapter trait.

use async_trait::async_trait;

use crate::error::LumenError;
use crate::traits::adapter::PluginAdapter;
use crate::types::AssetId;

/// Adapter for the external asset store.
///
/// Each call is a single attempt; no local caching.
#[async_trait]
pub trait AssetStore: PluginAdapter {
    /// Uploads `content` under the display name `name` and returns the new asset id.
    async fn create_asset(
        &self,
        name: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> Result<AssetId, LumenError>;

    /// Grants `agent_address` read and write access to `asset_id`.
    async fn set_permissions(
        &self,
        asset_id: &AssetId,
        agent_address: &str,
    ) -> Result<(), LumenError>;

    /// Host part used when building `agent-storage://` references.
    fn storage_url(&self) -> &str;
}
