//! Runtime configuration
//!
//! Loaded from an optional JSON file named by `LEVEL_CONFIG`, then overridden by
//! environment variables:
//! - `API_PORT`: listen port
//! - `GEMINI_MODEL`: generator model name
//! - `GEMINI_ENDPOINT`: generator API base URL
//!
//! The generator credential is never read from the file; it comes from
//! `GEMINI_API_KEY` only.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use level_core::logging::TracingConfig;
use level_core::RepairOptions;

pub const CONFIG_PATH_VAR: &str = "LEVEL_CONFIG";
pub const CREDENTIAL_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

/// External generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub endpoint: String,
    pub model: String,
    /// Per-request timeout; the source never retries
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub gemini: GeminiConfig,
    pub repair: RepairOptions,
    pub tracing: TracingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 50051,
            gemini: GeminiConfig::default(),
            repair: RepairOptions::default(),
            tracing: TracingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// File (if `LEVEL_CONFIG` is set) plus environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        info!(path = %path.display(), "Loaded server config");
        Ok(config)
    }

    /// Apply `API_PORT`, `GEMINI_MODEL` and `GEMINI_ENDPOINT` from `lookup`
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = lookup("API_PORT") {
            self.port = raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
                var: "API_PORT",
                value: raw.clone(),
            })?;
        }
        if let Some(model) = lookup("GEMINI_MODEL").filter(|m| !m.trim().is_empty()) {
            self.gemini.model = model;
        }
        if let Some(endpoint) = lookup("GEMINI_ENDPOINT").filter(|e| !e.trim().is_empty()) {
            self.gemini.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Generator credential, if present and non-blank
    pub fn credential_from_env() -> Option<String> {
        std::env::var(CREDENTIAL_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
