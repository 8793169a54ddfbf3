use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use level_core::logging::init_tracing;
use level_server::{api, ApiState, GeminiSource, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("Failed to load server configuration")?;
    init_tracing(&config.tracing);

    info!("Starting level server v{}", env!("CARGO_PKG_VERSION"));

    let credential = ServerConfig::credential_from_env();
    if credential.is_none() {
        warn!("GEMINI_API_KEY not set; GenerateRemote will answer 503");
    }

    let source = GeminiSource::from_config(&config.gemini, credential.clone().unwrap_or_default())
        .context("Failed to build generator client")?;
    info!(model = %config.gemini.model, endpoint = %config.gemini.endpoint, "Remote generator configured");

    let state = ApiState::new(config, Arc::new(source), credential);
    api::start_api_server(state)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("API server failed")?;

    info!("Level server stopped");
    Ok(())
}
