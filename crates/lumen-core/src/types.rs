// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Lumen pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// MIME type reported when the image download carries no `Content-Type`.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// URI scheme for references to assets held by the external store.
pub const ASSET_URI_SCHEME: &str = "agent-storage";

/// Opaque conversation scope identifier supplied by the transport.
///
/// Only used as the display name of stored assets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier assigned to an asset by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub String);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the `agent-storage://<host>/<id>` reference for a stored asset.
pub fn asset_uri(storage_host: &str, asset_id: &AssetId) -> String {
    format!("{ASSET_URI_SCHEME}://{storage_host}/{asset_id}")
}

/// Bytes and declared content type of a downloaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Value of the `Content-Type` response header, if present.
    pub content_type: Option<String>,
}

impl FetchedImage {
    /// The declared content type, or [`DEFAULT_MIME_TYPE`] when absent or blank.
    pub fn mime_type(&self) -> &str {
        match self.content_type.as_deref().map(str::trim) {
            Some(ct) if !ct.is_empty() => ct,
            _ => DEFAULT_MIME_TYPE,
        }
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the role an adapter plays in the pipeline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Generator,
    Fetcher,
    Storage,
    Channel,
}
