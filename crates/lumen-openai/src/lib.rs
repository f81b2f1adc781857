// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI image generation adapter for the Lumen agent.
//!
//! This crate implements [`ImageGenerator`] on top of the OpenAI Images API,
//! requesting a single image per prompt and returning its download URL.

pub mod client;
pub mod types;

use async_trait::async_trait;
use lumen_config::model::OpenAiConfig;
use lumen_core::traits::{ImageGenerator, PluginAdapter};
use lumen_core::types::{AdapterType, HealthStatus};
use lumen_core::LumenError;
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::OpenAiClient;
use crate::types::ImageGenerationRequest;

/// Environment variable consulted when `openai.api_key` is not configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI-backed [`ImageGenerator`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiImageGenerator {
    client: OpenAiClient,
    model: String,
    size: Option<String>,
}

impl OpenAiImageGenerator {
    /// Creates a generator from the `[openai]` config section.
    pub fn new(config: &OpenAiConfig) -> Result<Self, LumenError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = OpenAiClient::new(&api_key, &config.base_url)?;

        info!(model = config.model.as_str(), "OpenAI image generator initialized");

        Ok(Self {
            client,
            model: config.model.clone(),
            size: config.size.clone(),
        })
    }

    /// Returns the configured image model.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_request(&self, prompt: &str) -> ImageGenerationRequest {
        ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: self.size.clone(),
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiImageGenerator {
    fn name(&self) -> &str {
        "openai-images"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generator
    }

    async fn health_check(&self) -> Result<HealthStatus, LumenError> {
        // Generating an image costs money; a constructed client is considered healthy.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LumenError> {
        debug!("OpenAI image generator shutting down");
        Ok(())
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LumenError> {
        let response = self.client.generate(&self.to_request(prompt)).await?;

        let url = response.first_url().ok_or_else(|| LumenError::Generation {
            message: "response contained no image URL".into(),
            source: None,
        })?;

        if let Some(revised) = response.data.first().and_then(|d| d.revised_prompt.as_deref()) {
            debug!(revised_prompt = revised, "service revised the prompt");
        }

        Ok(url.to_string())
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<SecretString, LumenError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(SecretString::from(key.clone()));
    }

    std::env::var(API_KEY_ENV).map(SecretString::from).map_err(|_| {
        LumenError::Config(format!(
            "OpenAI API key not found. Set openai.api_key in config or the {API_KEY_ENV} environment variable."
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(base_url: &str) -> OpenAiConfig {
        OpenAiConfig {
            api_key: Some("sk-test".into()),
            model: "dall-e-3".into(),
            base_url: base_url.into(),
            size: Some("1024x1024".into()),
        }
    }

    #[test]
    fn resolve_api_key_from_config() {
        let key = resolve_api_key(&Some("sk-config".into())).unwrap();
        assert_eq!(key.expose_secret(), "sk-config");
    }

    #[test]
    fn plugin_adapter_metadata() {
        let generator = OpenAiImageGenerator::new(&config_for("http://localhost:1")).unwrap();
        assert_eq!(generator.name(), "openai-images");
        assert_eq!(generator.adapter_type(), AdapterType::Generator);
        assert_eq!(generator.model(), "dall-e-3");
    }

    #[test]
    fn request_asks_for_a_single_image() {
        let generator = OpenAiImageGenerator::new(&config_for("http://localhost:1")).unwrap();
        let req = generator.to_request("a red bicycle");
        assert_eq!(req.n, 1);
        assert_eq!(req.prompt, "a red bicycle");
        assert_eq!(req.size.as_deref(), Some("1024x1024"));
    }

    #[tokio::test]
    async fn generate_returns_first_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/images/generations"))
            .and(body_partial_json(serde_json::json!({"size": "1024x1024"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"url": "https://images.example.com/1.png", "revised_prompt": "a shiny red bicycle"},
                    {"url": "https://images.example.com/2.png"}
                ]
            })))
            .mount(&server)
            .await;

        let generator = OpenAiImageGenerator::new(&config_for(&server.uri())).unwrap();
        let url = generator.generate("a red bicycle").await.unwrap();
        assert_eq!(url, "https://images.example.com/1.png");
    }

    #[tokio::test]
    async fn generate_without_url_is_a_typed_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})),
            )
            .mount(&server)
            .await;

        let generator = OpenAiImageGenerator::new(&config_for(&server.uri())).unwrap();
        let err = generator.generate("x").await.unwrap_err();
        assert!(matches!(err, LumenError::Generation { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn upstream_error_is_not_returned_as_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let generator = OpenAiImageGenerator::new(&config_for(&server.uri())).unwrap();
        let result = generator.generate("x").await;
        assert!(result.is_err());
    }
}
