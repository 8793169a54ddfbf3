//! Level files on disk.
//!
//! Saved levels use the same wire JSON the simulation reads. Loading treats the
//! file as untrusted: it is parsed as a [`Candidate`] and passed through the
//! repair pass, so a hand-edited or truncated file still yields a valid level.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::level::LevelData;
use crate::repair::{repair_level_with_report, Candidate, CandidateError, RepairOptions};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid level file: {0}")]
    Candidate(#[from] CandidateError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn save_level(path: impl AsRef<Path>, level: &LevelData) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(level)?;
    fs::write(path, json)?;
    info!(path = %path.display(), fingerprint = %level.fingerprint_hex(), "Saved level");
    Ok(())
}

pub fn load_level(path: impl AsRef<Path>, opts: &RepairOptions) -> Result<LevelData, PersistenceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let candidate = Candidate::from_json(&content)?;
    let (level, report) = repair_level_with_report(candidate, opts);
    debug!(path = %path.display(), ?report, "Loaded level");
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::generation::LevelArchetype;

    #[test]
    fn test_repaired_level_survives_save_and_load() {
        let opts = RepairOptions::default();
        let original = crate::repair::repair_level(
            Candidate::Shapeless {
                enemy_hints: Vec::new(),
            },
            &opts,
        );
        let file = NamedTempFile::new().unwrap();
        save_level(file.path(), &original).unwrap();
        let loaded = load_level(file.path(), &opts).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_loaded_archetype_gets_repaired() {
        let file = NamedTempFile::new().unwrap();
        save_level(file.path(), &LevelArchetype::Classic.generate()).unwrap();
        let loaded = load_level(file.path(), &RepairOptions::default()).unwrap();
        assert_eq!(loaded.grid().width(), 220);
        // repair stamps its own goal five columns from the right edge
        assert_eq!(loaded.grid().find_flagpole().map(|f| f.x), Some(215));
        assert_eq!(loaded.entities()[0].id, 1000);
    }

    #[test]
    fn test_missing_file() {
        let err = load_level("/nonexistent/level.json", &RepairOptions::default()).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
    }

    #[test]
    fn test_file_without_map() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"entities": []}}"#).unwrap();
        let err = load_level(file.path(), &RepairOptions::default()).unwrap_err();
        assert!(matches!(err, PersistenceError::Candidate(CandidateError::MissingMap)));
    }
}
