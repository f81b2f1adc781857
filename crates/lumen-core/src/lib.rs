// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lumen image relay agent.
//!
//! This crate provides the error type, the chat and structured protocol types,
//! and the adapter traits that sit at every external boundary of the pipeline.

pub mod error;
pub mod protocol;
pub mod traits;
pub mod types;

pub use error::{BoxError, LumenError};
pub use protocol::{
    ChatAcknowledgement, ChatContent, ChatMessage, Envelope, ErrorMessage, ImageRequest,
    ImageResponse, InboundChat, InboundEnvelope, Resource, ResourceField,
};
pub use types::{AdapterType, AssetId, FetchedImage, HealthStatus, SessionId, asset_uri};

pub use traits::{AssetStore, ImageFetcher, ImageGenerator, PluginAdapter, ReplySink};

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn every_error_variant_reports_a_stage() {
        let cases = [
            (LumenError::Config("x".into()), "config"),
            (
                LumenError::Generation {
                    message: "x".into(),
                    source: None,
                },
                "generation",
            ),
            (
                LumenError::Fetch {
                    status: Some(404),
                    message: "x".into(),
                    source: None,
                },
                "fetch",
            ),
            (
                LumenError::Storage {
                    message: "x".into(),
                    source: None,
                },
                "storage",
            ),
            (
                LumenError::Permission {
                    message: "x".into(),
                    source: None,
                },
                "permission",
            ),
            (
                LumenError::Channel {
                    message: "x".into(),
                    source: None,
                },
                "channel",
            ),
            (
                LumenError::RateLimited {
                    retry_after: Duration::from_secs(5),
                },
                "quota",
            ),
            (LumenError::Internal("x".into()), "internal"),
        ];

        for (err, stage) in cases {
            assert_eq!(err.stage(), stage, "wrong stage for {err}");
        }
    }

    #[test]
    fn rate_limited_display_mentions_retry() {
        let err = LumenError::RateLimited {
            retry_after: Duration::from_secs(90),
        };
        assert_eq!(err.to_string(), "rate limit exceeded, retry after 90s");
    }

    #[test]
    fn asset_uri_uses_agent_storage_scheme() {
        let uri = asset_uri("https://agentverse.ai/v1/storage", &AssetId("A1".into()));
        assert_eq!(uri, "agent-storage://https://agentverse.ai/v1/storage/A1");
    }

    #[test]
    fn fetched_image_defaults_missing_content_type() {
        let img = FetchedImage {
            bytes: vec![1, 2, 3],
            content_type: None,
        };
        assert_eq!(img.mime_type(), "application/octet-stream");

        let blank = FetchedImage {
            bytes: vec![],
            content_type: Some("  ".into()),
        };
        assert_eq!(blank.mime_type(), "application/octet-stream");

        let png = FetchedImage {
            bytes: vec![],
            content_type: Some("image/png".into()),
        };
        assert_eq!(png.mime_type(), "image/png");
    }

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        for variant in [
            AdapterType::Generator,
            AdapterType::Fetcher,
            AdapterType::Storage,
            AdapterType::Channel,
        ] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn all_adapter_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_generator<T: ImageGenerator>() {}
        fn _assert_fetcher<T: ImageFetcher>() {}
        fn _assert_store<T: AssetStore>() {}
        fn _assert_sink<T: ReplySink>() {}
    }
}
