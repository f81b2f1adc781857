// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory asset store for deterministic testing.
//!
//! `MockStore` implements `AssetStore`, recording every upload and grant so
//! tests can assert on side effects.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lumen_core::LumenError;
use lumen_core::traits::{AssetStore, PluginAdapter};
use lumen_core::types::{AdapterType, AssetId, HealthStatus};

/// Storage URL reported when none is given.
pub const MOCK_STORAGE_URL: &str = "storage.test";

/// One recorded `create_asset` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAsset {
    pub name: String,
    pub content: Vec<u8>,
    pub mime_type: String,
}

/// One recorded `set_permissions` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub asset_id: AssetId,
    pub agent_address: String,
}

/// A mock asset store with scripted create and grant outcomes.
///
/// Both queues are FIFO. An empty create queue assigns `asset-<n>` ids, an
/// empty grant queue succeeds. Failed calls are recorded too.
pub struct MockStore {
    storage_url: String,
    create_outcomes: Arc<Mutex<VecDeque<Result<String, String>>>>,
    grant_outcomes: Arc<Mutex<VecDeque<Result<(), String>>>>,
    created: Arc<Mutex<Vec<CreatedAsset>>>,
    grants: Arc<Mutex<Vec<Grant>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::with_storage_url(MOCK_STORAGE_URL)
    }

    pub fn with_storage_url(storage_url: &str) -> Self {
        Self {
            storage_url: storage_url.to_string(),
            create_outcomes: Arc::new(Mutex::new(VecDeque::new())),
            grant_outcomes: Arc::new(Mutex::new(VecDeque::new())),
            created: Arc::new(Mutex::new(Vec::new())),
            grants: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an upload that is assigned `asset_id`.
    pub async fn push_asset_id(&self, asset_id: &str) {
        self.create_outcomes
            .lock()
            .await
            .push_back(Ok(asset_id.to_string()));
    }

    /// Queue an upload the store rejects.
    pub async fn push_create_failure(&self, message: &str) {
        self.create_outcomes
            .lock()
            .await
            .push_back(Err(message.to_string()));
    }

    /// Queue a grant the store rejects.
    pub async fn push_grant_failure(&self, message: &str) {
        self.grant_outcomes
            .lock()
            .await
            .push_back(Err(message.to_string()));
    }

    pub async fn created(&self) -> Vec<CreatedAsset> {
        self.created.lock().await.clone()
    }

    pub async fn grants(&self) -> Vec<Grant> {
        self.grants.lock().await.clone()
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockStore {
    fn name(&self) -> &str {
        "mock-store"
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
        Ok(())
    }
}

#[async_trait]
impl AssetStore for MockStore {
    async fn create_asset(
        &self,
        name: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> Result<AssetId, LumenError> {
        let mut created = self.created.lock().await;
        created.push(CreatedAsset {
            name: name.to_string(),
            content,
            mime_type: mime_type.to_string(),
        });
        let ordinal = created.len();
        drop(created);

        match self.create_outcomes.lock().await.pop_front() {
            Some(Ok(id)) => Ok(AssetId(id)),
            Some(Err(message)) => Err(LumenError::Storage {
                message,
                source: None,
            }),
            None => Ok(AssetId(format!("asset-{ordinal}"))),
        }
    }

    async fn set_permissions(
        &self,
        asset_id: &AssetId,
        agent_address: &str,
    ) -> Result<(), LumenError> {
        self.grants.lock().await.push(Grant {
            asset_id: asset_id.clone(),
            agent_address: agent_address.to_string(),
        });

        match self.grant_outcomes.lock().await.pop_front() {
            Some(Err(message)) => Err(LumenError::Permission {
                message,
                source: None,
            }),
            _ => Ok(()),
        }
    }

    fn storage_url(&self) -> &str {
        &self.storage_url
    }
}
