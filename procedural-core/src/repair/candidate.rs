//! Untrusted level candidates.
//!
//! Anything produced outside the deterministic generators (a generative model's
//! response, a level file on disk) enters the crate as a [`Candidate`]. Parsing is
//! deliberately lenient: only an unparseable document or a missing `map` is
//! terminal, every other defect is left for the repair pass to fix.

use serde_json::Value;

use crate::level::LevelData;

/// Enemy placement suggested by the candidate, in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyHint {
    pub x: f64,
    pub y: f64,
    pub type_label: String,
}

impl EnemyHint {
    pub fn new(x: f64, y: f64, type_label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            type_label: type_label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// Non-empty grid of raw cell codes (unknown codes and ragged rows allowed)
    Layout {
        rows: Vec<Vec<i64>>,
        enemy_hints: Vec<EnemyHint>,
    },
    /// Empty or zero-width grid; repair substitutes the fallback layout
    Shapeless { enemy_hints: Vec<EnemyHint> },
}

#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    #[error("candidate is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("candidate is not a JSON object")]
    NotAnObject,
    #[error("candidate has no map")]
    MissingMap,
}

/// Code substituted for cells that are not integers
const INVALID_CELL: i64 = -1;

impl Candidate {
    pub fn from_parts(rows: Vec<Vec<i64>>, enemy_hints: Vec<EnemyHint>) -> Self {
        if rows.first().map_or(true, |r| r.is_empty()) {
            Self::Shapeless { enemy_hints }
        } else {
            Self::Layout { rows, enemy_hints }
        }
    }

    /// Parse a raw response body or file.
    ///
    /// Hints are read from `enemyPositions` (`{x, y, type}` in pixels) or, for
    /// persisted levels, from `entities` (`{pos: {x, y}, type}`).
    pub fn from_json(text: &str) -> Result<Self, CandidateError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, CandidateError> {
        let object = value.as_object().ok_or(CandidateError::NotAnObject)?;

        let rows = object
            .get("map")
            .and_then(Value::as_array)
            .ok_or(CandidateError::MissingMap)?
            .iter()
            .map(parse_row)
            .collect();

        let enemy_hints = match object.get("enemyPositions") {
            Some(Value::Array(items)) => items.iter().filter_map(parse_hint).collect(),
            _ => object
                .get("entities")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(parse_entity_hint).collect())
                .unwrap_or_default(),
        };

        Ok(Self::from_parts(rows, enemy_hints))
    }

    /// Re-enter a finished level as a candidate (grid codes plus entity positions)
    pub fn from_level(level: &LevelData) -> Self {
        let rows = level
            .grid()
            .rows()
            .map(|row| row.iter().map(|t| i64::from(t.code())).collect())
            .collect();
        let enemy_hints = level
            .entities()
            .iter()
            .map(|e| EnemyHint::new(f64::from(e.pos.x), f64::from(e.pos.y), "GOOMBA"))
            .collect();
        Self::from_parts(rows, enemy_hints)
    }

    pub fn enemy_hints(&self) -> &[EnemyHint] {
        match self {
            Self::Layout { enemy_hints, .. } | Self::Shapeless { enemy_hints } => enemy_hints,
        }
    }

    pub fn is_shapeless(&self) -> bool {
        matches!(self, Self::Shapeless { .. })
    }
}

fn parse_row(row: &Value) -> Vec<i64> {
    match row {
        Value::Array(cells) => cells.iter().map(parse_cell).collect(),
        _ => Vec::new(),
    }
}

fn parse_cell(cell: &Value) -> i64 {
    if let Some(code) = cell.as_i64() {
        return code;
    }
    match cell.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e9 => f as i64,
        _ => INVALID_CELL,
    }
}

fn parse_hint(item: &Value) -> Option<EnemyHint> {
    let x = item.get("x")?.as_f64()?;
    let y = item.get("y").and_then(Value::as_f64).unwrap_or(0.0);
    let label = item.get("type").and_then(Value::as_str).unwrap_or_default();
    Some(EnemyHint::new(x, y, label))
}

fn parse_entity_hint(item: &Value) -> Option<EnemyHint> {
    let pos = item.get("pos")?;
    let x = pos.get("x")?.as_f64()?;
    let y = pos.get("y").and_then(Value::as_f64).unwrap_or(0.0);
    let label = item.get("type").and_then(Value::as_str).unwrap_or_default();
    Some(EnemyHint::new(x, y, label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_errors() {
        assert!(matches!(
            Candidate::from_json("{not json"),
            Err(CandidateError::Json(_))
        ));
        assert!(matches!(
            Candidate::from_json("[1, 2]"),
            Err(CandidateError::NotAnObject)
        ));
        assert!(matches!(
            Candidate::from_json(r#"{"enemyPositions": []}"#),
            Err(CandidateError::MissingMap)
        ));
        assert!(matches!(
            Candidate::from_json(r#"{"map": null}"#),
            Err(CandidateError::MissingMap)
        ));
        assert!(matches!(
            Candidate::from_json(r#"{"map": "0,1"}"#),
            Err(CandidateError::MissingMap)
        ));
    }

    #[test]
    fn test_lenient_cells_and_rows() {
        let c = Candidate::from_json(r#"{"map": [[1, "x", 2.0, null, 40], 7]}"#).unwrap();
        match c {
            Candidate::Layout { rows, enemy_hints } => {
                assert_eq!(rows, vec![vec![1, -1, 2, -1, 40], vec![]]);
                assert!(enemy_hints.is_empty());
            }
            other => panic!("expected layout, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_map_is_shapeless() {
        let c = Candidate::from_json(r#"{"map": [], "enemyPositions": [{"x": 32}]}"#).unwrap();
        assert!(c.is_shapeless());
        assert_eq!(c.enemy_hints(), &[EnemyHint::new(32.0, 0.0, "")]);

        let c = Candidate::from_json(r#"{"map": [[], [1]]}"#).unwrap();
        assert!(c.is_shapeless());
    }

    #[test]
    fn test_hint_parsing() {
        let c = Candidate::from_json(
            r#"{"map": [[0]], "enemyPositions": [
                {"x": 16, "y": 160, "type": "GOOMBA"},
                {"y": 3},
                {"x": "far"},
                {"x": 48.5, "type": 7}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            c.enemy_hints(),
            &[
                EnemyHint::new(16.0, 160.0, "GOOMBA"),
                EnemyHint::new(48.5, 0.0, ""),
            ]
        );
    }

    #[test]
    fn test_non_array_hints_ignored() {
        let c = Candidate::from_json(r#"{"map": [[0]], "enemyPositions": {"x": 1}}"#).unwrap();
        assert!(c.enemy_hints().is_empty());
    }

    #[test]
    fn test_entities_read_as_hints() {
        let c = Candidate::from_json(
            r#"{"map": [[0]], "entities": [{"type": "GOOMBA", "pos": {"x": 64, "y": 192}}]}"#,
        )
        .unwrap();
        assert_eq!(c.enemy_hints(), &[EnemyHint::new(64.0, 192.0, "GOOMBA")]);
    }
}
