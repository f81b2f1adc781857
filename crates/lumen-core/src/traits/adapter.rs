// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all remote adapters implement.

use async_trait::async_trait;

use crate::error::LumenError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Lumen adapters.
///
/// Provides identity, lifecycle, and health check capabilities for the
/// generation, fetch and storage collaborators.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the role this adapter plays.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, LumenError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), LumenError>;
}
