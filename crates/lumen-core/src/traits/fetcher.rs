// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image download adapter trait.

use async_trait::async_trait;

use crate::error::LumenError;
use crate::traits::adapter::PluginAdapter;
use crate::types::FetchedImage;

/// Downloads a generated image by URL.
#[async_trait]
pub trait ImageFetcher: PluginAdapter {
    /// Issues one GET for `url`. Any status other than 200 is a
    /// [`LumenError::Fetch`].
    async fn fetch(&self, url: &str) -> Result<FetchedImage, LumenError>;
}
