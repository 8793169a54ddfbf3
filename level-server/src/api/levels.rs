//! LevelService: level generation and repair endpoints
//!
//! Endpoints:
//! - POST /level.LevelService/GenerateArchetype
//! - POST /level.LevelService/RepairCandidate
//! - POST /level.LevelService/GenerateRemote
//! - POST /level.LevelService/AuditLevel

use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use level_core::repair::repair_level_with_report;
use level_core::{Candidate, LevelArchetype, LevelData, PlayabilityReport, StyleSelection};

use super::{ApiError, ApiState};
use crate::generation::generate_level;

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route(
            "/level.LevelService/GenerateArchetype",
            post(generate_archetype),
        )
        .route(
            "/level.LevelService/RepairCandidate",
            post(repair_candidate),
        )
        .route("/level.LevelService/GenerateRemote", post(generate_remote))
        .route("/level.LevelService/AuditLevel", post(audit_level))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct ArchetypeRequest {
    pub archetype: String,
}

#[derive(Deserialize, Default)]
pub struct RemoteRequest {
    /// Reproducible style/seed selection; random when absent. An empty body is
    /// accepted as `{}`.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Serialize)]
pub struct LevelResponse {
    pub fingerprint: String,
    pub level: LevelData,
}

impl LevelResponse {
    fn new(level: LevelData) -> Self {
        Self {
            fingerprint: level.fingerprint_hex(),
            level,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn generate_archetype(
    State(state): State<ApiState>,
    Json(req): Json<ArchetypeRequest>,
) -> Result<Json<LevelResponse>, ApiError> {
    let archetype: LevelArchetype = req
        .archetype
        .parse()
        .map_err(|e: level_core::generation::UnknownArchetype| ApiError::bad_request(e.to_string()))?;

    let level = archetype.generate();
    state.metrics.record_level_served();
    Ok(Json(LevelResponse::new(level)))
}

/// Body is the raw candidate document (`map` plus `enemyPositions` or `entities`)
async fn repair_candidate(
    State(state): State<ApiState>,
    body: String,
) -> Result<Json<LevelResponse>, ApiError> {
    let candidate = Candidate::from_json(&body).map_err(|e| {
        warn!("Rejected candidate: {}", e);
        ApiError::bad_request(e.to_string())
    })?;

    let (level, report) = repair_level_with_report(candidate, &state.config.repair);
    info!(?report, "Repaired candidate");
    state.metrics.record_level_served();
    Ok(Json(LevelResponse::new(level)))
}

async fn generate_remote(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<Json<LevelResponse>, ApiError> {
    let req: RemoteRequest = if body.iter().all(u8::is_ascii_whitespace) {
        RemoteRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::bad_request(e.to_string()))?
    };
    let selection = match req.seed {
        Some(seed) => StyleSelection::from_seed(seed),
        None => StyleSelection::random(),
    };

    let level = generate_level(
        state.credential.as_deref(),
        state.source.as_ref(),
        &state.config.repair,
        selection,
    )
    .await;

    match level {
        Some(level) => {
            state.metrics.record_level_served();
            Ok(Json(LevelResponse::new(level)))
        }
        None => {
            state.metrics.record_remote_failure();
            Err(ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Remote generation produced no level",
            ))
        }
    }
}

/// Repair the candidate, then report how it fares against the playability audit
async fn audit_level(
    State(state): State<ApiState>,
    body: String,
) -> Result<Json<PlayabilityReport>, ApiError> {
    let candidate =
        Candidate::from_json(&body).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let (level, _) = repair_level_with_report(candidate, &state.config.repair);
    Ok(Json(PlayabilityReport::inspect(
        &level,
        state.config.repair.spawn_columns,
    )))
}
