//! HTTP/JSON API Layer
//!
//! Provides REST-like endpoints following gRPC path conventions.
//!
//! ## Architecture
//! ```text
//! Client (JSON over HTTP)
//!       ↓ HTTP POST, JSON body
//! Axum Router (port 50051)
//!       ↓
//! LevelService handlers
//!       ↓
//! level_core (generators, repair) + LevelSource (remote generator)
//! ```
//!
//! ## Endpoint Convention
//! All endpoints follow gRPC path pattern: `POST /level.<Service>/<Method>`
//! Example: `POST /level.LevelService/GenerateArchetype`

pub mod levels;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::ServerConfig;
use crate::metrics::ServerMetrics;
use crate::source::LevelSource;

/// Shared state available to all API handlers
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<ServerConfig>,
    /// Remote level generator
    pub source: Arc<dyn LevelSource>,
    /// Generator credential; remote generation is refused without it
    pub credential: Option<Arc<str>>,
    /// Server-wide metrics (lock-free atomics)
    pub metrics: Arc<ServerMetrics>,
}

impl ApiState {
    pub fn new(config: ServerConfig, source: Arc<dyn LevelSource>, credential: Option<String>) -> Self {
        Self {
            config: Arc::new(config),
            source,
            credential: credential.map(Arc::from),
            metrics: ServerMetrics::new(),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Error body returned with a non-2xx status
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Build the full API router with all service endpoints
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(crate::metrics::prometheus_handler))
        .route("/metrics/json", get(crate::metrics::json_metrics_handler))
        .merge(levels::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::metrics::metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP API server; returns after Ctrl-C
pub async fn start_api_server(state: ApiState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = state.config.bind_addr();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;
    Ok(())
}
