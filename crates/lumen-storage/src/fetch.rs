// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain HTTP download of generated images.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use lumen_core::LumenError;
use lumen_core::traits::{ImageFetcher, PluginAdapter};
use lumen_core::types::{AdapterType, FetchedImage, HealthStatus};

/// Downloads images with a single unauthenticated GET.
///
/// Only `200 OK` counts as success. Redirects are followed by the client, so
/// the status seen here belongs to the final hop.
#[derive(Debug, Clone, Default)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PluginAdapter for HttpImageFetcher {
    fn name(&self) -> &str {
        "http-fetch"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Fetcher
    }

    async fn health_check(&self) -> Result<HealthStatus, LumenError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LumenError> {
        Ok(())
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, LumenError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LumenError::Fetch {
                status: None,
                message: format!("download request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LumenError::Fetch {
                status: Some(status.as_u16()),
                message: format!("download returned {status}"),
                source: None,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|e| LumenError::Fetch {
            status: Some(status.as_u16()),
            message: format!("failed to read image body: {e}"),
            source: Some(Box::new(e)),
        })?;

        debug!(
            size = bytes.len(),
            content_type = content_type.as_deref().unwrap_or("-"),
            "image downloaded"
        );

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
