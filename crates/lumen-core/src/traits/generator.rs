// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image generation adapter trait.

use async_trait::async_trait;

use crate::error::LumenError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for text-to-image generation services.
///
/// Generators request exactly one image per prompt and never retry.
#[async_trait]
pub trait ImageGenerator: PluginAdapter {
    /// Generates an image for `prompt` and returns its download URL.
    ///
    /// Upstream failures are reported as [`LumenError::Generation`], never as
    /// a URL-shaped string.
    async fn generate(&self, prompt: &str) -> Result<String, LumenError>;
}
