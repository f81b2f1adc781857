// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response bodies for the agent storage REST API.

use serde::{Deserialize, Serialize};

/// Body of `POST <storage_url>/assets/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssetRequest {
    pub name: String,
    pub mime_type: String,
    /// Base64-encoded asset bytes.
    pub contents: String,
}

/// Reply to a successful asset upload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssetResponse {
    pub asset_id: String,
}

/// Body of `PUT <storage_url>/assets/<id>/permissions/`.
#[derive(Debug, Clone, Serialize)]
pub struct SetPermissionsRequest {
    pub agent_address: String,
    pub read: bool,
    pub write: bool,
}
