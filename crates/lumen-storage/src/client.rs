// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the agent storage REST API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use lumen_core::{AssetId, LumenError};

use crate::types::{CreateAssetRequest, CreateAssetResponse, SetPermissionsRequest};

/// HTTP client for agent storage.
///
/// Every request is a single attempt; rejected uploads and grants surface as
/// [`LumenError::Storage`] and [`LumenError::Permission`] respectively.
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    storage_url: String,
}

impl StorageClient {
    /// Creates a client for `storage_url` (e.g. `https://agentverse.ai/v1/storage`).
    pub fn new(api_token: &SecretString, storage_url: &str) -> Result<Self, LumenError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_token.expose_secret()))
            .map_err(|e| LumenError::Config(format!("invalid storage API token header value: {e}")))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LumenError::Storage {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            storage_url: storage_url.trim_end_matches('/').to_string(),
        })
    }

    /// The storage API URL this client talks to.
    pub fn storage_url(&self) -> &str {
        &self.storage_url
    }

    /// Uploads `content` and returns the id assigned by the store.
    pub async fn create_asset(
        &self,
        name: &str,
        content: &[u8],
        mime_type: &str,
    ) -> Result<AssetId, LumenError> {
        let body = CreateAssetRequest {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            contents: STANDARD.encode(content),
        };

        let response = self
            .client
            .post(format!("{}/assets/", self.storage_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| LumenError::Storage {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, size = content.len(), "asset upload response received");

        if !is_accepted(status) {
            let text = response.text().await.unwrap_or_default();
            return Err(LumenError::Storage {
                message: format!("failed to create asset: {status} {text}"),
                source: None,
            });
        }

        let created: CreateAssetResponse =
            response.json().await.map_err(|e| LumenError::Storage {
                message: format!("failed to parse asset creation response: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(AssetId(created.asset_id))
    }

    /// Grants `agent_address` read and write access to `asset_id`.
    pub async fn set_permissions(
        &self,
        asset_id: &AssetId,
        agent_address: &str,
    ) -> Result<(), LumenError> {
        if agent_address.trim().is_empty() {
            return Err(LumenError::Permission {
                message: "recipient address must not be empty".into(),
                source: None,
            });
        }

        let body = SetPermissionsRequest {
            agent_address: agent_address.to_string(),
            read: true,
            write: true,
        };

        let response = self
            .client
            .put(format!("{}/assets/{asset_id}/permissions/", self.storage_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| LumenError::Permission {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, asset_id = %asset_id, "permission grant response received");

        if !is_accepted(status) {
            let text = response.text().await.unwrap_or_default();
            return Err(LumenError::Permission {
                message: format!("failed to set permissions on {asset_id}: {status} {text}"),
                source: None,
            });
        }

        Ok(())
    }
}

fn is_accepted(status: StatusCode) -> bool {
    matches!(status, StatusCode::OK | StatusCode::CREATED)
}
