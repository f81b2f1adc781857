// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lumen image relay agent.

use std::time::Duration;

use thiserror::Error;

/// Boxed upstream error carried by adapter failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used across all Lumen adapter traits and the request pipeline.
///
/// Each pipeline stage has its own variant so that a failure can be logged with
/// the stage it came from, even though every variant collapses to the same
/// user-facing notice on the chat path.
#[derive(Debug, Error)]
pub enum LumenError {
    /// Configuration errors (missing credentials, invalid header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The image-generation service rejected the prompt or returned no image.
    #[error("image generation failed: {message}")]
    Generation {
        message: String,
        source: Option<BoxError>,
    },

    /// Downloading the generated image failed or returned a non-200 status.
    #[error("image fetch failed: {message}")]
    Fetch {
        status: Option<u16>,
        message: String,
        source: Option<BoxError>,
    },

    /// The asset store rejected the upload (quota, auth, size).
    #[error("asset storage failed: {message}")]
    Storage {
        message: String,
        source: Option<BoxError>,
    },

    /// Granting the recipient access to a stored asset failed.
    #[error("asset permission grant failed: {message}")]
    Permission {
        message: String,
        source: Option<BoxError>,
    },

    /// Delivering an outbound envelope through the transport failed.
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<BoxError>,
    },

    /// The sender exhausted its structured-request quota.
    #[error("rate limit exceeded, retry after {}s", .retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LumenError {
    /// Short name of the pipeline stage this error belongs to, used as a log field.
    pub fn stage(&self) -> &'static str {
        match self {
            LumenError::Config(_) => "config",
            LumenError::Generation { .. } => "generation",
            LumenError::Fetch { .. } => "fetch",
            LumenError::Storage { .. } => "storage",
            LumenError::Permission { .. } => "permission",
            LumenError::Channel { .. } => "channel",
            LumenError::RateLimited { .. } => "quota",
            LumenError::Internal(_) => "internal",
        }
    }
}
