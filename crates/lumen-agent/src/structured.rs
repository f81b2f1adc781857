// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Direct request/response path: generate and reply with the URL.

use std::sync::Arc;

use lumen_core::protocol::{Envelope, ErrorMessage, ImageRequest, ImageResponse};
use lumen_core::traits::ImageGenerator;
use tracing::{info, warn};

/// Answers structured image requests without touching storage.
pub struct StructuredHandler {
    generator: Arc<dyn ImageGenerator>,
}

impl StructuredHandler {
    pub fn new(generator: Arc<dyn ImageGenerator>) -> Self {
        Self { generator }
    }

    /// Returns exactly one reply: [`ImageResponse`] or [`ErrorMessage`]
    /// carrying the failure text.
    pub async fn handle(&self, sender: &str, request: &ImageRequest) -> Envelope {
        match self.generator.generate(&request.image_description).await {
            Ok(image_url) => {
                info!(sender, "structured image request completed");
                Envelope::ImageResponse(ImageResponse { image_url })
            }
            Err(err) => {
                warn!(sender, stage = err.stage(), error = %err, "structured image request failed");
                Envelope::ErrorMessage(ErrorMessage {
                    error: err.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_test_utils::MockGenerator;

    fn request(prompt: &str) -> ImageRequest {
        ImageRequest {
            image_description: prompt.into(),
        }
    }

    #[tokio::test]
    async fn success_replies_with_url() {
        let handler = StructuredHandler::new(Arc::new(MockGenerator::returning("https://i/1.png")));
        let reply = handler.handle("peer", &request("a red bicycle")).await;
        assert_eq!(
            reply,
            Envelope::ImageResponse(ImageResponse {
                image_url: "https://i/1.png".into()
            })
        );
    }

    #[tokio::test]
    async fn failure_replies_with_error_text() {
        let handler = StructuredHandler::new(Arc::new(MockGenerator::failing("billing limit")));
        match handler.handle("peer", &request("x")).await {
            Envelope::ErrorMessage(msg) => {
                assert_eq!(msg.error, "image generation failed: billing limit");
            }
            other => panic!("expected error message, got {other:?}"),
        }
    }
}
