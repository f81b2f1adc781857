// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Lumen integration tests.
//!
//! Provides mock adapters for fast, deterministic, CI-runnable tests without
//! external services.
//!
//! # Components
//!
//! - [`MockGenerator`] - Image generator with scripted URLs and failures
//! - [`MockFetcher`] - Image download with scripted bodies and statuses
//! - [`MockStore`] - Asset store recording uploads and grants
//! - [`RecordingSink`] - Reply sink capturing outbound envelopes

pub mod mock_fetcher;
pub mod mock_generator;
pub mod mock_store;
pub mod recording_sink;

pub use mock_fetcher::{FetchOutcome, MockFetcher, PNG_BYTES};
pub use mock_generator::{DEFAULT_IMAGE_URL, MockGenerator};
pub use mock_store::{CreatedAsset, Grant, MOCK_STORAGE_URL, MockStore};
pub use recording_sink::RecordingSink;
