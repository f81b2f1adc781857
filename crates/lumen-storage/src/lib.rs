// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asset store and image download adapters for the Lumen agent.
//!
//! [`AgentStorage`] implements [`AssetStore`] against the agent platform's
//! storage API. [`HttpImageFetcher`] implements [`ImageFetcher`] with a plain
//! HTTP GET.

pub mod client;
pub mod fetch;
pub mod types;

pub use fetch::HttpImageFetcher;

use async_trait::async_trait;
use lumen_config::model::StorageConfig;
use lumen_core::LumenError;
use lumen_core::traits::{AssetStore, PluginAdapter};
use lumen_core::types::{AdapterType, AssetId, HealthStatus};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::StorageClient;

/// Environment variable consulted when `storage.api_key` is not configured.
pub const API_KEY_ENV: &str = "AGENTVERSE_API_KEY";

/// Agent platform storage backed [`AssetStore`].
///
/// Token resolution order: config -> `AGENTVERSE_API_KEY` env var -> error.
pub struct AgentStorage {
    client: StorageClient,
}

impl AgentStorage {
    /// Creates a store from the `[storage]` config section.
    pub fn new(config: &StorageConfig) -> Result<Self, LumenError> {
        let token = resolve_api_key(&config.api_key)?;
        let client = StorageClient::new(&token, &config.storage_url())?;

        info!(storage_url = client.storage_url(), "agent storage initialized");

        Ok(Self { client })
    }
}

#[async_trait]
impl PluginAdapter for AgentStorage {
    fn name(&self) -> &str {
        "agent-storage"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, LumenError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LumenError> {
        debug!("agent storage shutting down");
        Ok(())
    }
}

#[async_trait]
impl AssetStore for AgentStorage {
    async fn create_asset(
        &self,
        name: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> Result<AssetId, LumenError> {
        self.client.create_asset(name, &content, mime_type).await
    }

    async fn set_permissions(
        &self,
        asset_id: &AssetId,
        agent_address: &str,
    ) -> Result<(), LumenError> {
        self.client.set_permissions(asset_id, agent_address).await
    }

    fn storage_url(&self) -> &str {
        self.client.storage_url()
    }
}

fn resolve_api_key(config_key: &Option<String>) -> Result<SecretString, LumenError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(SecretString::from(key.clone()));
    }

    std::env::var(API_KEY_ENV).map(SecretString::from).map_err(|_| {
        LumenError::Config(format!(
            "storage API token not found. Set storage.api_key in config or the {API_KEY_ENV} environment variable."
        ))
    })
}
