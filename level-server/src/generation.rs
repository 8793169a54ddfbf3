//! Remote generate-and-repair
//!
//! Ask the [`LevelSource`] for a candidate, then hand it to the repair pass.
//! Every failure is logged and reported as "no level"; nothing is retried.

use std::time::Instant;

use tracing::{error, info, warn};

use level_core::constants::{LEVEL_HEIGHT, REMOTE_LEVEL_WIDTH};
use level_core::repair::repair_level_with_report;
use level_core::{Candidate, CandidateError, LevelData, PlayabilityReport, RepairOptions, StyleSelection};

use crate::source::{LevelRequest, LevelSource, SourceError};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("No generator credential configured")]
    MissingCredential,
    #[error("Level source failed: {0}")]
    Source(#[from] SourceError),
    #[error("Level source returned an empty response")]
    EmptyResponse,
    #[error("Unusable candidate: {0}")]
    Candidate(#[from] CandidateError),
}

/// Generate a level, or `None` when any step fails (the reason is logged)
pub async fn generate_level(
    credential: Option<&str>,
    source: &dyn LevelSource,
    opts: &RepairOptions,
    selection: StyleSelection,
) -> Option<LevelData> {
    match try_generate_level(credential, source, opts, selection).await {
        Ok(level) => Some(level),
        Err(GenerateError::MissingCredential) => {
            warn!("No generator credential provided, skipping remote generation");
            None
        }
        Err(e) => {
            error!(style = %selection.style, seed = selection.seed, "Failed to generate level: {}", e);
            None
        }
    }
}

pub async fn try_generate_level(
    credential: Option<&str>,
    source: &dyn LevelSource,
    opts: &RepairOptions,
    selection: StyleSelection,
) -> Result<LevelData, GenerateError> {
    if credential.map_or(true, |key| key.trim().is_empty()) {
        return Err(GenerateError::MissingCredential);
    }

    let started = Instant::now();
    let request = LevelRequest::new(selection, REMOTE_LEVEL_WIDTH, LEVEL_HEIGHT);
    info!(style = %selection.style, seed = selection.seed, "Requesting remote level");

    let text = source.request_level(&request).await?;
    if text.trim().is_empty() {
        return Err(GenerateError::EmptyResponse);
    }

    let request_ms = started.elapsed().as_millis() as u64;
    let candidate = Candidate::from_json(&text)?;
    let (level, report) = repair_level_with_report(candidate, opts);

    let audit = PlayabilityReport::inspect(&level, opts.spawn_columns);
    info!(
        fingerprint = %level.fingerprint_hex(),
        enemies = audit.enemy_count,
        relocated = report.relocated,
        dropped = report.dropped_embedded,
        synthesized = report.synthesized,
        fallback = report.used_fallback,
        reachable = audit.goal_reachable,
        request_ms,
        "Remote level repaired"
    );
    if !audit.is_playable() {
        warn!(?audit, "Repaired level fails the playability audit");
    }
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use level_core::LevelStyle;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Text(&'static str),
        Fail,
    }

    struct MockSource {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl MockSource {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LevelSource for MockSource {
        async fn request_level(&self, request: &LevelRequest) -> Result<String, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!((request.width, request.height), (150, 15));
            match &self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Fail => Err(SourceError::Status {
                    status: 500,
                    body: "internal".to_string(),
                }),
            }
        }
    }

    fn selection() -> StyleSelection {
        StyleSelection::new(LevelStyle::Classic, 42)
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_request() {
        let source = MockSource::new(Reply::Text(r#"{"map": [[1]]}"#));
        let opts = RepairOptions::default();
        assert!(generate_level(None, &source, &opts, selection()).await.is_none());
        assert!(generate_level(Some("   "), &source, &opts, selection()).await.is_none());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let source = MockSource::new(Reply::Fail);
        let err = try_generate_level(Some("key"), &source, &RepairOptions::default(), selection())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::Source(SourceError::Status { status: 500, .. })));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_and_malformed_responses() {
        let opts = RepairOptions::default();

        let empty = MockSource::new(Reply::Text("  "));
        let err = try_generate_level(Some("key"), &empty, &opts, selection()).await.unwrap_err();
        assert!(matches!(err, GenerateError::EmptyResponse));

        let garbage = MockSource::new(Reply::Text("Sure! Here is your level:"));
        let err = try_generate_level(Some("key"), &garbage, &opts, selection()).await.unwrap_err();
        assert!(matches!(err, GenerateError::Candidate(CandidateError::Json(_))));

        let no_map = MockSource::new(Reply::Text(r#"{"enemyPositions": []}"#));
        assert!(generate_level(Some("key"), &no_map, &opts, selection()).await.is_none());
    }

    #[tokio::test]
    async fn test_candidate_is_repaired() {
        let source = MockSource::new(Reply::Text(
            r#"{"map": [], "enemyPositions": [{"x": 320, "y": 0, "type": "GOOMBA"}]}"#,
        ));
        let level = generate_level(Some("key"), &source, &RepairOptions::default(), selection())
            .await
            .unwrap();
        assert_eq!(level.grid().width(), 150);
        assert_eq!(level.entities().len(), 1);
        assert_eq!(level.entities()[0].id, 1000);
        assert_eq!(level.entities()[0].pos.x, 320.0);
        assert_eq!(level.grid().find_flagpole().map(|f| f.x), Some(145));
    }
}
