// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock image fetcher for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lumen_core::LumenError;
use lumen_core::traits::{ImageFetcher, PluginAdapter};
use lumen_core::types::{AdapterType, FetchedImage, HealthStatus};

/// PNG signature bytes served when nothing else is scripted.
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Scripted result of one download.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Status 200 with the given body and optional `Content-Type`.
    Ok(FetchedImage),
    /// Any non-200 status.
    Status(u16),
}

/// A mock fetcher that serves scripted downloads and records requested URLs.
///
/// An empty queue serves [`PNG_BYTES`] as `image/png`.
pub struct MockFetcher {
    outcomes: Arc<Mutex<VecDeque<FetchOutcome>>>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful download.
    pub async fn push_image(&self, bytes: &[u8], content_type: Option<&str>) {
        self.outcomes
            .lock()
            .await
            .push_back(FetchOutcome::Ok(FetchedImage {
                bytes: bytes.to_vec(),
                content_type: content_type.map(str::to_string),
            }));
    }

    /// Queue a download answered with `status`.
    pub async fn push_status(&self, status: u16) {
        self.outcomes
            .lock()
            .await
            .push_back(FetchOutcome::Status(status));
    }

    /// URLs requested so far.
    pub async fn urls(&self) -> Vec<String> {
        self.urls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.urls.lock().await.len()
    }
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockFetcher {
    fn name(&self) -> &str {
        "mock-fetcher"
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
impl ImageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, LumenError> {
        self.urls.lock().await.push(url.to_string());
        match self.outcomes.lock().await.pop_front() {
            Some(FetchOutcome::Ok(image)) => Ok(image),
            Some(FetchOutcome::Status(status)) => Err(LumenError::Fetch {
                status: Some(status),
                message: format!("download returned {status}"),
                source: None,
            }),
            None => Ok(FetchedImage {
                bytes: PNG_BYTES.to_vec(),
                content_type: Some("image/png".to_string()),
            }),
        }
    }
}
