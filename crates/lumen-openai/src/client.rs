// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI Images API.
//!
//! Provides [`OpenAiClient`], which handles request construction and
//! authentication. Each call is a single attempt.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use lumen_core::LumenError;

use crate::types::{ApiErrorResponse, ImageGenerationRequest, ImageGenerationResponse};

/// HTTP client for OpenAI image generation.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client authenticating with `api_key` against `base_url`
    /// (e.g. `https://api.openai.com/v1`).
    pub fn new(api_key: &SecretString, base_url: &str) -> Result<Self, LumenError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| LumenError::Config(format!("invalid OpenAI API key header value: {e}")))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LumenError::Generation {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn generations_url(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }

    /// Requests image generation and returns the parsed response.
    ///
    /// Non-2xx responses become [`LumenError::Generation`] carrying the API's
    /// error message when the body is a recognised error envelope.
    pub async fn generate(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse, LumenError> {
        let response = self
            .client
            .post(self.generations_url())
            .json(request)
            .send()
            .await
            .map_err(|e| LumenError::Generation {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = request.model.as_str(), "image generation response received");

        let body = response.text().await.map_err(|e| LumenError::Generation {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(LumenError::Generation {
                message,
                source: None,
            });
        }

        serde_json::from_str(&body).map_err(|e| LumenError::Generation {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
