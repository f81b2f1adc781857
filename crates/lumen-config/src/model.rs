// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Lumen image relay agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Placeholder written over secrets when the config is displayed.
pub const REDACTED: &str = "[redacted]";

/// Top-level Lumen configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LumenConfig {
    /// Agent identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP transport settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Image generation service settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// External asset store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Structured-request rate limit settings.
    #[serde(default)]
    pub quota: QuotaConfig,
}

impl LumenConfig {
    /// Returns a copy with every credential replaced by [`REDACTED`].
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        let hide = |v: &mut Option<String>| {
            if v.is_some() {
                *v = Some(REDACTED.to_string());
            }
        };
        hide(&mut config.gateway.bearer_token);
        hide(&mut config.openai.api_key);
        hide(&mut config.storage.api_key);
        config
    }

    /// Renders the redacted configuration as TOML.
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.redacted())
    }
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Text sent to chat peers when a request cannot be fulfilled.
    #[serde(default = "default_error_notice")]
    pub error_notice: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            error_notice: default_error_notice(),
        }
    }
}

fn default_agent_name() -> String {
    "Image Generator Agent".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_error_notice() -> String {
    "Sorry, I couldn't process your request. Please try again later.".to_string()
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required on `/v1/*` routes. `None` leaves them open.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bearer_token: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Image generation service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` requires the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Image model identifier.
    #[serde(default = "default_image_model")]
    pub model: String,

    /// API base URL, without a trailing slash.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Requested image size (e.g. "1024x1024"). `None` uses the model default.
    #[serde(default)]
    pub size: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_image_model(),
            base_url: default_openai_base_url(),
            size: None,
        }
    }
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

/// External asset store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage API token. `None` requires the `AGENTVERSE_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the agent platform hosting the store.
    #[serde(default = "default_storage_base_url")]
    pub base_url: String,
}

impl StorageConfig {
    /// Full URL of the storage API, `<base_url>/v1/storage`.
    pub fn storage_url(&self) -> String {
        format!("{}/v1/storage", self.base_url.trim_end_matches('/'))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_storage_base_url(),
        }
    }
}

fn default_storage_base_url() -> String {
    "https://agentverse.ai".to_string()
}

/// Fixed-window quota applied per sender to structured requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuotaConfig {
    /// Window length in minutes.
    #[serde(default = "default_window_minutes")]
    pub window_minutes: u64,

    /// Requests allowed per sender within one window.
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            window_minutes: default_window_minutes(),
            max_requests: default_max_requests(),
        }
    }
}

fn default_window_minutes() -> u64 {
    60
}

fn default_max_requests() -> u32 {
    30
}
