// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lumen serve` implementation.
//!
//! Builds the adapters from configuration, wires the agent into the HTTP
//! gateway, and runs until SIGINT or SIGTERM.

use std::sync::Arc;

use lumen_agent::Agent;
use lumen_agent::shutdown::install_signal_handler;
use lumen_config::LumenConfig;
use lumen_core::LumenError;
use lumen_core::traits::PluginAdapter;
use lumen_core::types::HealthStatus;
use lumen_gateway::{GatewayState, start_server};
use lumen_openai::OpenAiImageGenerator;
use lumen_storage::{AgentStorage, HttpImageFetcher};
use tracing::{info, warn};

/// Runs the agent until a shutdown signal arrives.
pub async fn run_serve(config: LumenConfig) -> Result<(), LumenError> {
    init_tracing(&config.agent.log_level);

    let generator = Arc::new(OpenAiImageGenerator::new(&config.openai)?);
    let fetcher = Arc::new(HttpImageFetcher::new());
    let store = Arc::new(AgentStorage::new(&config.storage)?);

    let adapters: [&dyn PluginAdapter; 3] = [generator.as_ref(), fetcher.as_ref(), store.as_ref()];
    for adapter in adapters {
        match adapter.health_check().await {
            Ok(HealthStatus::Healthy) => {
                info!(adapter = adapter.name(), kind = %adapter.adapter_type(), "adapter ready");
            }
            Ok(status) => warn!(adapter = adapter.name(), ?status, "adapter not fully healthy"),
            Err(e) => warn!(adapter = adapter.name(), error = %e, "adapter health check failed"),
        }
    }

    let agent = Arc::new(Agent::new(
        &config,
        generator.clone(),
        fetcher.clone(),
        store.clone(),
    ));

    let cancel = install_signal_handler();
    let sweeper = agent.quota().spawn_sweeper(cancel.clone());

    info!(agent_name = agent.name(), "lumen serving");
    let state = GatewayState::new(agent, &config.gateway);
    let result = start_server(&config.gateway, state, cancel.clone()).await;

    cancel.cancel();
    if let Err(e) = sweeper.await {
        warn!(error = %e, "quota sweeper ended abnormally");
    }

    for adapter in adapters {
        if let Err(e) = adapter.shutdown().await {
            warn!(adapter = adapter.name(), error = %e, "adapter shutdown failed");
        }
    }

    info!("lumen stopped");
    result
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lumen={log_level},warn")));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}
