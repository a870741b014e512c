//! JSON scenario files for the headless runner.
//!
//! A scenario describes a single room as ASCII rows together with the agent,
//! the projectiles and enemies in it, and a scripted cursor.

use std::fs;
use std::path::{Path, PathBuf};

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entity::{AgentSnapshot, EnemySnapshot, ProjectileSnapshot};
use crate::grid::{CellGrid, GridError, RoomId};

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_ticks() -> u64 {
    60
}

/// Errors raised while loading a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid room layout")]
    Layout(#[from] GridError),
    #[error("tick delta must be positive and finite, got {0}")]
    InvalidDelta(f32),
}

/// Declarative description of a scripted encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Room layout, top row first.
    pub rows: Vec<String>,
    /// World coordinate of the bottom-left cell.
    #[serde(default)]
    pub origin: IVec2,
    #[serde(default)]
    pub room: u32,
    /// Whether the room has active enemies.
    #[serde(default)]
    pub fighting: bool,
    pub agent: AgentSnapshot,
    #[serde(default)]
    pub projectiles: Vec<ProjectileSnapshot>,
    #[serde(default)]
    pub enemies: Vec<EnemySnapshot>,
    #[serde(default)]
    pub cursor: Vec2,
    /// Ticks on which the manual roll input is pressed.
    #[serde(default)]
    pub roll_ticks: Vec<u64>,
    /// Ticks on which the toggle key is pressed.
    #[serde(default)]
    pub toggle_ticks: Vec<u64>,
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Default run length when the command line does not override it.
    #[serde(default = "default_ticks")]
    pub ticks: u64,
}

impl Scenario {
    /// Parses and validates a scenario from JSON text.
    ///
    /// # Errors
    /// Returns [`ScenarioError`] for malformed JSON, a bad layout or a
    /// non-positive tick delta. Parse errors report `source` as the path.
    pub fn from_json(text: &str, source: &Path) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(text).map_err(|err| ScenarioError::Parse {
            path: source.to_path_buf(),
            source: err,
        })?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reads a scenario file.
    ///
    /// # Errors
    /// Returns [`ScenarioError`] when the file cannot be read, parsed or
    /// validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ScenarioError::InvalidDelta(self.dt));
        }
        self.grid().map(|_| ())
    }

    #[must_use]
    pub fn room_id(&self) -> RoomId {
        RoomId::from(self.room)
    }

    /// Builds the room's cell grid.
    ///
    /// # Errors
    /// Returns [`ScenarioError::Layout`] when the rows do not form a valid
    /// layout.
    pub fn grid(&self) -> Result<CellGrid, ScenarioError> {
        Ok(CellGrid::from_ascii(&self.rows, self.origin, self.room_id())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn parse(text: &str) -> Result<Scenario, ScenarioError> {
        Scenario::from_json(text, Path::new("inline.json"))
    }

    #[rstest]
    fn minimal_scenario_takes_defaults() {
        let scenario = parse(
            r#"{"rows": ["...", "..."], "agent": {"position": [1.5, 1.0], "speed": 5.0}}"#,
        )
        .expect("minimal scenario");
        assert_relative_eq!(scenario.dt, 1.0 / 60.0);
        assert_eq!(scenario.ticks, 60);
        assert!(!scenario.fighting);
        assert_eq!(scenario.room_id(), RoomId(0));
        assert_eq!(scenario.grid().expect("layout").len(), 6);
    }

    #[rstest]
    fn bad_glyph_is_reported() {
        let err = parse(r#"{"rows": ["..?"], "agent": {"position": [0.5, 0.5], "speed": 5.0}}"#)
            .expect_err("glyph should fail");
        assert!(matches!(
            err,
            ScenarioError::Layout(GridError::UnknownGlyph { glyph: '?', .. })
        ));
    }

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-0.5)]
    fn non_positive_delta_is_rejected(#[case] dt: f32) {
        let text = format!(
            r#"{{"rows": ["."], "agent": {{"position": [0.5, 0.5], "speed": 5.0}}, "dt": {dt}}}"#
        );
        assert!(matches!(parse(&text), Err(ScenarioError::InvalidDelta(_))));
    }

    #[rstest]
    fn malformed_json_names_the_source() {
        let err = parse("{").expect_err("truncated json");
        assert!(err.to_string().contains("inline.json"));
    }
}
