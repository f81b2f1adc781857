// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock image generator for deterministic testing.
//!
//! `MockGenerator` implements `ImageGenerator` with scripted outcomes so the
//! orchestration can be exercised without calling a real image service.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lumen_core::LumenError;
use lumen_core::traits::{ImageGenerator, PluginAdapter};
use lumen_core::types::{AdapterType, HealthStatus};

/// URL returned when no outcome has been scripted.
pub const DEFAULT_IMAGE_URL: &str = "https://images.test/generated.png";

/// A mock generator returning pre-configured URLs or failures.
///
/// Outcomes are popped from a FIFO queue. When the queue is empty,
/// [`DEFAULT_IMAGE_URL`] is returned. Every prompt is recorded.
pub struct MockGenerator {
    outcomes: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a generator that answers the first call with `url`.
    pub fn returning(url: &str) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from([Ok(url.to_string())]))),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a generator whose first call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from([Err(message.to_string())]))),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful outcome.
    pub async fn push_url(&self, url: &str) {
        self.outcomes.lock().await.push_back(Ok(url.to_string()));
    }

    /// Queue a generation failure.
    pub async fn push_failure(&self, message: &str) {
        self.outcomes.lock().await.push_back(Err(message.to_string()));
    }

    /// Prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockGenerator {
    fn name(&self) -> &str {
        "mock-generator"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generator
    }

    async fn health_check(&self) -> Result<HealthStatus, LumenError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LumenError> {
        Ok(())
    }
}

#[async_trait]
impl ImageGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LumenError> {
        self.prompts.lock().await.push(prompt.to_string());
        match self.outcomes.lock().await.pop_front() {
            Some(Ok(url)) => Ok(url),
            Some(Err(message)) => Err(LumenError::Generation {
                message,
                source: None,
            }),
            None => Ok(DEFAULT_IMAGE_URL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_outcomes_are_fifo() {
        let generator = MockGenerator::new();
        generator.push_url("https://a/1.png").await;
        generator.push_failure("quota exhausted").await;

        assert_eq!(generator.generate("one").await.unwrap(), "https://a/1.png");
        assert!(generator.generate("two").await.is_err());
        assert_eq!(generator.generate("three").await.unwrap(), DEFAULT_IMAGE_URL);
        assert_eq!(generator.prompts().await, vec!["one", "two", "three"]);
    }
}
