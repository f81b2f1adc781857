// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external collaborators of the pipeline.
//!
//! Remote adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod channel;
pub mod fetcher;
pub mod generator;
pub mod storage;

pub use adapter::PluginAdapter;
pub use channel::ReplySink;
pub use fetcher::ImageFetcher;
pub use generator::ImageGenerator;
pub use storage::AssetStore;
